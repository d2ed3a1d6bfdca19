use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(crate::XmlMap)]
#[derive(Clone, PartialEq, Debug, Default)]
#[xml_map(crate = "crate")]
pub struct Product {
	pub id: i64,
	pub name: String,
	pub price: Decimal,
	pub in_stock: bool,
	pub discontinued: Option<NaiveDate>,
	pub tags: Vec<String>,
	#[xml_map(attribute)]
	pub sku: String,
}

impl Product {
	pub const TEST_DOCUMENT: &'static str = r#"<?xml version="1.0" encoding="utf-8"?>
<Product sku="LMP-1">
	<id>12</id>
	<Name>Desk lamp</Name>
	<price>19.90</price>
	<in_stock>TRUE</in_stock>
	<Discontinued/>
	<Tags><Tag>office</Tag><Tag>light</Tag></Tags>
</Product>"#;

	pub fn test_result() -> Self {
		Self {
			id: 12,
			name: "Desk lamp".into(),
			price: Decimal::new(1990, 2),
			in_stock: true,
			discontinued: None,
			tags: vec!["office".into(), "light".into()],
			sku: "LMP-1".into(),
		}
	}
}

#[derive(crate::XmlMap)]
#[derive(Clone, PartialEq, Debug, Default)]
#[xml_map(crate = "crate")]
pub struct ProductPage {
	#[xml_map(rename = "page")]
	pub page_number: u32,
	#[xml_map(items)]
	pub products: Vec<Product>,
}

impl ProductPage {
	pub const TEST_DOCUMENT: &'static str = r#"<ProductPage page="2">
	<Product sku="A"><Id>1</Id><Name>Lamp</Name></Product>
	<Product sku="B"><Id>2</Id><Name>Chair</Name></Product>
</ProductPage>"#;

	pub fn test_result() -> Self {
		Self {
			page_number: 2,
			products: vec![
				Product {
					id: 1,
					name: "Lamp".into(),
					sku: "A".into(),
					..Product::default()
				},
				Product {
					id: 2,
					name: "Chair".into(),
					sku: "B".into(),
					..Product::default()
				},
			],
		}
	}
}

#[derive(crate::XmlMap)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[xml_map(crate = "crate")]
pub struct Address {
	pub street: String,
	pub city: String,
	#[xml_map(rename = "zip")]
	pub postal_code: Option<String>,
}

#[derive(crate::XmlEnum)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[xml_map(crate = "crate")]
pub enum Status {
	#[default]
	Active,
	PendingApproval,
	Closed = 10,
}

#[derive(crate::XmlMap)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[xml_map(crate = "crate")]
pub struct Customer {
	pub name: String,
	pub address: Address,
	pub billing_address: Option<Address>,
	#[xml_map(rename = "Orders")]
	pub order_ids: Vec<u32>,
	pub status: Status,
	#[xml_map(skip)]
	pub note: String,
}

impl Customer {
	pub const TEST_DOCUMENT: &'static str = r#"<Customer>
	<Name>Ann</Name>
	<Address>
		<Street>1 Main St</Street>
		<City>Springfield</City>
		<zip>12345</zip>
	</Address>
	<billing-address>
		<Street>PO Box 7</Street>
		<City>Shelbyville</City>
	</billing-address>
	<Orders><Order>1</Order><Order>2</Order></Orders>
	<Status>pending_approval</Status>
	<Note>ignored</Note>
</Customer>"#;

	pub fn test_result() -> Self {
		Self {
			name: "Ann".into(),
			address: Address {
				street: "1 Main St".into(),
				city: "Springfield".into(),
				postal_code: Some("12345".into()),
			},
			billing_address: Some(Address {
				street: "PO Box 7".into(),
				city: "Shelbyville".into(),
				postal_code: None,
			}),
			order_ids: vec![1, 2],
			status: Status::PendingApproval,
			note: String::new(),
		}
	}
}
