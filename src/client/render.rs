//! 产品卡片渲染

use chrono::{DateTime, Local, Utc};
use rusty_money::{iso, Money};

use super::view::ProductCard;
use crate::app::produtos::model::Product;

pub fn product_card(product: &Product) -> ProductCard {
    ProductCard {
        id: product.id,
        name: product.name.clone(),
        price: format_price(product.price),
        description: product.description.clone(),
        created_at: format_timestamp(product.created_at),
    }
}

/// 以雷亚尔格式化价格（按分四舍五入）
pub fn format_price(price: f64) -> String {
    let minor = (price * 100.0).round() as i64;
    Money::from_minor(minor, iso::BRL).to_string()
}

/// 本地时区的 `dd/mm/yyyy HH:MM:SS`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}
