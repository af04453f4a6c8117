//! Offline checkout flow: configuration, parameter building and response
//! parsing, without any network.

use chrono::NaiveDate;
use pagseguro::{
    Amount, CheckoutRequest, CheckoutResponse, Config, ConfigError, FromXml, Item,
    PagSeguroError, Sender, Shipping, ShippingType, TransactionSearchResult, is_valid_cpf,
    is_valid_email,
};
use pagseguro_integration_tests::test_credentials;
use serde_json::json;

const SEARCH_XML: &str = r#"<?xml version="1.0" encoding="ISO-8859-1" standalone="yes"?>
<transactionSearchResult>
    <date>2011-02-16T20:14:35.000-02:00</date>
    <currentPage>1</currentPage>
    <resultsInThisPage>2</resultsInThisPage>
    <totalPages>1</totalPages>
    <transactions>
        <transaction>
            <date>2011-02-05T15:46:12.000-02:00</date>
            <lastEventDate>2011-02-15T17:39:14.000-03:00</lastEventDate>
            <code>9E884542-81B3-4419-9A75-BCC6FB495EF1</code>
            <reference>REF1234</reference>
            <type>1</type>
            <status>3</status>
            <paymentMethod>
                <type>1</type>
            </paymentMethod>
            <grossAmount>49900.00</grossAmount>
            <discountAmount>0.00</discountAmount>
            <feeAmount>0.00</feeAmount>
            <netAmount>49900.00</netAmount>
            <extraAmount>0.00</extraAmount>
        </transaction>
        <transaction>
            <date>2011-02-07T18:57:52.000-02:00</date>
            <lastEventDate>2011-02-14T21:37:24.000-03:00</lastEventDate>
            <code>2FB07A22-68FF-4F83-A356-24153A0C05E1</code>
            <reference>REF5678</reference>
            <type>3</type>
            <status>4</status>
            <paymentMethod>
                <type>3</type>
            </paymentMethod>
            <grossAmount>26900.00</grossAmount>
            <discountAmount>0.00</discountAmount>
            <feeAmount>0.00</feeAmount>
            <netAmount>26900.00</netAmount>
            <extraAmount>0.00</extraAmount>
        </transaction>
    </transactions>
</transactionSearchResult>"#;

fn full_request(config: Config) -> CheckoutRequest {
    let mut request = CheckoutRequest::new(test_credentials(), config);
    request.set_reference("12345");
    request.add_item(Item::new(
        "0001",
        "Notebook Prata",
        Amount::from_cents(2_430_000),
        1,
        1000,
    ));
    request.add_item(
        Item::new("0002", "Notebook Rosa", Amount::from_cents(2_560_000), 2, 750)
            .with_shipping_cost(Amount::from_cents(1_000)),
    );
    request.sender = Sender {
        name: Some("José Comprador".to_string()),
        area_code: Some("11".to_string()),
        phone: Some("56273440".to_string()),
        email: Some("comprador@uol.com.br".to_string()),
        cpf: Some("482.268.465-28".to_string()),
        cnpj: None,
        born_date: NaiveDate::from_ymd_opt(1987, 3, 21),
    };
    request.shipping = Shipping {
        shipping_type: Some(ShippingType::Sedex),
        street: Some("Av. Brig. Faria Lima".to_string()),
        number: Some("1384".to_string()),
        complement: Some("5o andar".to_string()),
        district: Some("Jardim Paulistano".to_string()),
        postal_code: Some("01452002".to_string()),
        city: Some("Sao Paulo".to_string()),
        state: Some("SP".to_string()),
        country: None,
        cost: Some(Amount::from_cents(2_150)),
    };
    request.extra_amount = Some(Amount::from_cents(-500));
    request.redirect_url = Some("https://shop.example.com/thanks".to_string());
    request.abandon_url = Some("https://shop.example.com/cart".to_string());
    request
}

#[test]
fn test_full_request_params() {
    let params = full_request(Config::sandbox())
        .build_checkout_params()
        .expect("valid request");

    for key in [
        "email",
        "token",
        "receiverEmail",
        "currency",
        "reference",
        "senderName",
        "senderAreaCode",
        "senderPhone",
        "senderEmail",
        "senderCPF",
        "senderBornDate",
        "shippingType",
        "shippingAddressStreet",
        "shippingAddressNumber",
        "shippingAddressComplement",
        "shippingAddressDistrict",
        "shippingAddressPostalCode",
        "shippingAddressCity",
        "shippingAddressState",
        "shippingAddressCountry",
        "shippingCost",
        "itemId1",
        "itemDescription1",
        "itemAmount1",
        "itemQuantity1",
        "itemWeight1",
        "itemId2",
        "itemShippingCost2",
        "extraAmount",
        "redirectURL",
        "abandonURL",
    ] {
        assert!(params.contains_key(key), "missing {key}");
    }

    assert!(!params.contains_key("notificationURL"));
    assert!(!params.contains_key("senderCNPJ"));
    assert_eq!(params.get("reference"), Some("REF12345"));
    assert_eq!(params.get("senderBornDate"), Some("21/03/1987"));
    assert_eq!(params.get("shippingType"), Some("2"));
    assert_eq!(params.get("shippingAddressCountry"), Some("BRA"));
    assert_eq!(params.get("itemQuantity2"), Some("2"));
    assert_eq!(params.get("extraAmount"), Some("-5.00"));
}

#[test]
fn test_params_serialize_as_flat_object() {
    let params = full_request(Config::default())
        .build_checkout_params()
        .expect("valid request");

    let value = serde_json::to_value(&params).expect("serializable");
    assert_eq!(value["itemAmount1"], json!("24300.00"));
    assert_eq!(value["email"], json!("seller@example.com"));
}

#[test]
fn test_invalid_sender_email_fails() {
    let mut request = full_request(Config::default());
    request.sender.email = Some("john.com".to_string());

    let err = request.build_checkout_params().expect_err("invalid email");
    assert_eq!(err.field(), "senderEmail");
    assert!(is_valid_email("john.com").is_err());
}

#[test]
fn test_cpf_passes_through_unchanged() {
    assert_eq!(is_valid_cpf("482.268.465-28"), Ok("482.268.465-28"));
    assert_eq!(is_valid_cpf("48226846528"), Ok("48226846528"));

    let params = full_request(Config::default())
        .build_checkout_params()
        .expect("valid request");
    assert_eq!(params.get("senderCPF"), Some("482.268.465-28"));
}

#[test]
fn test_overrides_drive_params() {
    let config = Config::from_overrides(&json!({
        "currency": "USD",
        "reference_prefix": "ORD",
        "use_shipping": false,
    }))
    .expect("valid overrides");

    let params = full_request(config)
        .build_checkout_params()
        .expect("valid request");
    assert_eq!(params.get("currency"), Some("USD"));
    assert_eq!(params.get("reference"), Some("ORD12345"));
    assert_eq!(params.get("shippingAddressRequired"), Some("false"));
    assert!(!params.contains_key("shippingAddressStreet"));
}

#[test]
fn test_malformed_overrides() {
    let err = Config::from_overrides(&json!(["sandbox"])).expect_err("not an object");
    assert!(matches!(err, ConfigError::Malformed(_)));

    let err = PagSeguroError::from(err);
    assert!(!err.is_validation());
}

#[test]
fn test_parse_search_fixture() {
    let result =
        TransactionSearchResult::from_xml(SEARCH_XML, &Config::default()).expect("valid XML");

    assert_eq!(result.current_page(), Some(1));
    assert_eq!(result.results_in_page(), Some(2));
    assert_eq!(result.total_pages(), Some(1));

    let codes: Vec<&str> = result
        .transactions()
        .iter()
        .map(|t| t.code.as_str())
        .collect();
    assert_eq!(
        codes,
        [
            "9E884542-81B3-4419-9A75-BCC6FB495EF1",
            "2FB07A22-68FF-4F83-A356-24153A0C05E1"
        ]
    );
}

#[test]
fn test_checkout_response_uses_config_host() {
    let xml = "<checkout><code>ABC123</code><date>2010-12-02T10:11:28.000-02:00</date></checkout>";

    let response = CheckoutResponse::from_xml(xml, &Config::sandbox()).expect("valid XML");
    assert_eq!(
        response.payment_url.as_str(),
        "https://sandbox.pagseguro.uol.com.br/v2/checkout/payment.html?code=ABC123"
    );
}
