use chrono::{DateTime, Local, Utc};
use console::style;
use std::sync::Arc;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::models::{Item, Product};

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Open")]
    link: String,
}

pub fn format_product_table(products: &[Arc<Product>]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            id: product.id.to_string(),
            title: if product.title.chars().count() > 40 {
                format!("{}...", product.title.chars().take(37).collect::<String>())
            } else {
                product.title.clone()
            },
            price: format_price(product.price),
            link: format!("#item/{}", product.id),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::single(2), Alignment::right());

    table.to_string()
}

pub fn format_product_detail(product: &Product) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("ID").bold(), style(&product.id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Title").bold(), style(&product.title).green()));
    output.push_str(&format!(
        "{}: {}\n",
        style("Price").bold(),
        style(format_price(product.price)).yellow()
    ));

    output
}

pub fn format_order_summary(product: &Product, item: Option<&Item>) -> String {
    let mut output = format_product_detail(product);

    match item {
        Some(item) => {
            output.push_str(&format!("{}: {}\n", style("Quantity").bold(), item.quantity));
            output.push_str(&format!(
                "{}: {}\n",
                style("Subtotal").bold(),
                style(format_price(item.price())).yellow()
            ));
            let address = item.address.as_deref().filter(|a| !a.trim().is_empty());
            output.push_str(&format!(
                "{}: {}\n",
                style("Ship to").bold(),
                match address {
                    Some(address) => style(address.to_string()).green(),
                    None => style("-".to_string()).dim(),
                }
            ));
            output.push_str(&format!(
                "{}: {}\n",
                style("Updated").bold(),
                style(format_date(&item.updated_at)).dim()
            ));
        }
        None => {
            output.push_str(&format!("{}\n", style("Not in cart").dim()));
        }
    }

    output
}

pub fn format_cart_badge(count: u64, cost: f64, padding_top: u16) -> String {
    let padding = "\n".repeat(usize::from(padding_top / 10));
    format!(
        "{}{} {} {} {}",
        padding,
        style("Cart:").bold(),
        style(format!("{} item(s)", count)).cyan(),
        style("|").dim(),
        style(format_price(cost)).yellow()
    )
}

pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
