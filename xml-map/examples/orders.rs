// use `cargo run -p xml-map --example orders` to run from git repository base directory

use rust_decimal::Decimal;
use xml_map::{
	culture::Culture,
	XmlDeserializer,
	XmlEnum,
	XmlMap,
};

#[derive(XmlEnum, Clone, Copy, Debug, Default)]
pub enum Status {
	#[default]
	Open,
	Shipped,
	Cancelled,
}

#[derive(XmlMap, Debug, Default)]
pub struct Line {
	#[xml_map(attribute, rename = "sku")]
	pub sku: String,
	pub quantity: u32,
	pub price: Decimal,
}

#[derive(XmlMap, Debug, Default)]
pub struct Order {
	pub order_id: u64,
	pub status: Status,
	pub ordered_at: Option<chrono::NaiveDateTime>,
	pub lines: Vec<Line>,
}

/// a list of orders with a page number of its own
#[derive(XmlMap, Debug, Default)]
pub struct OrderPage {
	pub page: u32,
	#[xml_map(items)]
	pub orders: Vec<Order>,
}

const DOCUMENT: &str = r#"<?xml version="1.0"?>
<export xmlns="urn:example:orders" page="1">
	<order>
		<order_id>1001</order_id>
		<status>shipped</status>
		<ordered-at>03.02.2024 10:15</ordered-at>
		<line sku="A-1"><quantity>2</quantity><price>4,50</price></line>
		<line sku="B-7"><quantity>1</quantity><price>19,99</price></line>
	</order>
	<order>
		<order_id>1002</order_id>
		<ordered-at></ordered-at>
	</order>
</export>
"#;

fn main() {
	let deserializer = XmlDeserializer::new().with_culture(Culture::de_de());
	let page: OrderPage = match deserializer.from_str(DOCUMENT) {
		Ok(page) => page,
		Err(e) => {
			eprintln!("failed to map document: {}", e);
			std::process::exit(1);
		},
	};
	println!("page {}", page.page);
	for order in &page.orders {
		println!("{:#?}", order);
	}
}
