//! Canned pages for every scenario step, and the mocks serving them.
//!
//! Merchant paths follow the live gateway; bank paths are the ones the fixture forms point at.

use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

/// Bank session id set by [bank_pay].
pub const SESSION_ID: &str = "0A1B2C3D4E5F";

/// Where `#apiForm` from [merchant_pay] posts to.
pub const BANK_FORM_PATH: &str = "/ecom/3ds";
/// Where `#form_send` from [bank_form] posts to.
pub const BANK_PAY_PATH: &str = "/ecom/pay";
/// Where `#fPaREs` from [bank_check_pin] posts to.
pub const MERCHANT_CONFIRM_PATH: &str = "/r3/secure/3ds/confirm";
/// Where `#apiForm` from [merchant_confirm] posts to.
pub const MERCHANT_DONE_PATH: &str = "/r3/secure/pay/done";

const HTML: &str = "text/html; charset=utf-8";

/// The order page with `#ptm-form`.
pub fn order_page() -> String {
    r#"<!DOCTYPE html>
<html><body>
<form class="search" action="/search"><input name="q"></form>
<form id="ptm-form" class="ptm-form" action="/r3/secure/pay/do-payment" method="post">
  <input type="hidden" name="shop_order_number" value="0012345">
  <input type="hidden" name="bill_amount" value="50">
  <input type="hidden" name="is_recurrent" value="false">
</form>
</body></html>"#
        .to_string()
}

/// The 3-D Secure hand-off form, as embedded in the merchant's JSON answer.
pub fn api_form(action: &str) -> String {
    format!(
        r#"<form id="apiForm" action="{action}" method="post">
  <input type="hidden" name="PaReq" value="eJxVUl1vgjAU">
  <input type="hidden" name="MD" value="md-42">
  <input type="hidden" name="TermUrl" value="https://merchant.test/r3/secure/3ds">
</form>"#
    )
}

/// The bank page with `#form_send`.
pub fn bank_page() -> String {
    format!(
        r#"<html><body onload="document.forms[0].submit()">
<form id="form_send" name="form_send" action="{BANK_PAY_PATH}" method="POST">
  <input type="hidden" name="lat" value="0">
  <input type="hidden" name="lng" value="0">
  <input type="hidden" name="token" value="tk-7">
  <input type="hidden" name="PaReq" value="eJxVUl1vgjAU">
</form>
</body></html>"#
    )
}

/// The bank page with `#fPaREs`.
pub fn pin_page() -> String {
    format!(
        r#"<html><body>
<form id="fPaREs" action="{MERCHANT_CONFIRM_PATH}" method="post">
  <input type="hidden" name="PaRes" value="eJzNWFmTo0iS">
  <input type="hidden" name="MD" value="md-42">
</form>
</body></html>"#
    )
}

/// The final merchant page, with or without the success phrase.
pub fn done_page(success: bool) -> String {
    let message = if success {
        "Оплата пройшла успішно"
    } else {
        "Оплата відхилена банком"
    };
    format!("<html><body><div class=\"result\"><h1>{message}</h1></div></body></html>")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), HTML)
}

/// `GET /r3/new-kyivstar/` answering with [order_page].
pub fn merchant_form() -> Mock {
    Mock::given(method("GET"))
        .and(path("/r3/new-kyivstar/"))
        .respond_with(html(order_page()))
}

/// Promo check answering with `description`, or with an empty response object.
pub fn merchant_promo(description: Option<&str>) -> Mock {
    let body = match description {
        Some(description) => json!({ "response": { "description": description } }),
        None => json!({ "response": {} }),
    };

    Mock::given(method("POST"))
        .and(path("/r3/secure/check/kyivstar-promo"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// The payment call answering with [api_form] wrapped in JSON.
pub fn merchant_pay() -> Mock {
    Mock::given(method("POST"))
        .and(path("/r3/secure/pay/do-payment"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": { "form": api_form(BANK_FORM_PATH) } })),
        )
}

/// The bank hand-off answering with [bank_page].
pub fn bank_form() -> Mock {
    Mock::given(method("POST"))
        .and(path(BANK_FORM_PATH))
        .respond_with(html(bank_page()))
}

/// The bank hand-off answering with a page without `#form_send`.
pub fn bank_form_missing() -> Mock {
    Mock::given(method("POST"))
        .and(path(BANK_FORM_PATH))
        .respond_with(html("<html><body>Технічні роботи</body></html>".to_string()))
}

/// The bank payment setting `JSESSIONID` to [SESSION_ID].
pub fn bank_pay() -> Mock {
    Mock::given(method("POST"))
        .and(path(BANK_PAY_PATH))
        .respond_with(
            html("<html><body>Введіть пароль</body></html>".to_string()).insert_header(
                "set-cookie",
                format!("JSESSIONID={SESSION_ID}; Path=/; HttpOnly").as_str(),
            ),
        )
}

/// The PIN check, matching only requests that carry `pin`.
pub fn bank_check_pin(pin: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/pCheckPIN.jsp"))
        .and(body_string_contains(format!("pPassword={pin}")))
        .respond_with(html(pin_page()))
}

/// The merchant confirmation answering with [api_form] pointing at the final page.
pub fn merchant_confirm() -> Mock {
    Mock::given(method("POST"))
        .and(path(MERCHANT_CONFIRM_PATH))
        .respond_with(html(api_form(MERCHANT_DONE_PATH)))
}

/// The final merchant page, see [done_page].
pub fn merchant_done(success: bool) -> Mock {
    Mock::given(method("POST"))
        .and(path(MERCHANT_DONE_PATH))
        .respond_with(html(done_page(success)))
}

/// Every merchant mock of a successful bill.
pub fn bill_merchant_mocks() -> Vec<Mock> {
    vec![merchant_form(), merchant_promo(None), merchant_pay()]
}

/// Every bank mock of a successful bill.
pub fn bill_bank_mocks() -> Vec<Mock> {
    vec![bank_form(), bank_pay()]
}
