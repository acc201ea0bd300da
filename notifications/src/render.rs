//! Message content for both notification kinds.
//!
//! Templated sends only need [`template_params`]; inline sends use the
//! `*_inline` builders which produce subject, HTML and plain text.

use crate::message::EmailBody;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use supperclub_core::ValidReservation;

/// Long date used in every message: `Tuesday, January 1, 2999`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Parameters handed to provider-hosted templates.
///
/// Every value is a string; `specialRequests` is empty when the customer
/// left no notes.
#[must_use]
pub fn template_params(reservation: &ValidReservation) -> Map<String, Value> {
    let mut params = Map::new();
    let mut put = |key: &str, value: String| {
        params.insert(key.to_string(), Value::String(value));
    };

    put("partySize", reservation.party_size.to_string());
    put("mealType", reservation.meal_type.label().to_string());
    put("date", format_date(reservation.date));
    put("time", reservation.time.clone());
    put("email", reservation.email.clone());
    put("phone", reservation.phone.clone());
    put("name", reservation.customer_name.clone());
    put("guests", reservation.guests_phrase());
    put(
        "specialRequests",
        reservation.special_requests.clone().unwrap_or_default(),
    );

    params
}

/// Staff-facing request with every submitted detail.
#[must_use]
pub fn restaurant_request_inline(reservation: &ValidReservation) -> EmailBody {
    let date = format_date(reservation.date);
    let meal = reservation.meal_type.label();
    let guests = reservation.guests_phrase();
    let notes = reservation.special_requests.as_deref().unwrap_or("None");

    let subject = format!("New {meal} reservation request: {guests} on {date}");

    let text = format!(
        "New reservation request\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Seating: {meal}\n\
         Date: {date}\n\
         Time: {time}\n\
         Party: {guests}\n\
         Special requests: {notes}\n\n\
         Reply to this email to reach the guest directly.\n",
        name = reservation.customer_name,
        email = reservation.email,
        phone = reservation.phone,
        time = reservation.time,
    );

    let html = format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>New reservation request</title>
</head>
<body style="font-family: Georgia, serif; line-height: 1.6; color: #222;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #7c2d12;">New {meal} reservation request</h2>
        <table style="border-collapse: collapse; width: 100%;">
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Name</strong></td><td>{name}</td></tr>
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Email</strong></td><td><a href="mailto:{email}">{email}</a></td></tr>
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Phone</strong></td><td>{phone}</td></tr>
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Date</strong></td><td>{date}</td></tr>
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Time</strong></td><td>{time}</td></tr>
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Party</strong></td><td>{guests}</td></tr>
            <tr><td style="padding: 4px 12px 4px 0;"><strong>Special requests</strong></td><td>{notes}</td></tr>
        </table>
        <p style="color: #666; font-size: 14px; margin-top: 30px;">
            Reply to this email to reach the guest directly.
        </p>
    </div>
</body>
</html>
"#,
        name = escape_html(&reservation.customer_name),
        email = escape_html(&reservation.email),
        phone = escape_html(&reservation.phone),
        time = escape_html(&reservation.time),
        notes = escape_html(notes),
    );

    EmailBody::Inline {
        subject,
        html,
        text,
    }
}

/// Customer-facing acknowledgement.
///
/// This confirms receipt of the request, not the table itself.
#[must_use]
pub fn customer_confirmation_inline(reservation: &ValidReservation) -> EmailBody {
    let date = format_date(reservation.date);
    let meal = reservation.meal_type.label();
    let guests = reservation.guests_phrase();

    let subject = format!("We received your {meal} reservation request");

    let text = format!(
        "Hi {name},\n\n\
         Thanks for your reservation request. Here is what we received:\n\n\
         Seating: {meal}\n\
         Date: {date}\n\
         Time: {time}\n\
         Party: {guests}\n\n\
         We will be in touch shortly to confirm your table.\n",
        name = reservation.customer_name,
        time = reservation.time,
    );

    let html = format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Reservation request received</title>
</head>
<body style="font-family: Georgia, serif; line-height: 1.6; color: #222;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #7c2d12;">Thanks, {name}!</h2>
        <p>We received your reservation request:</p>
        <ul>
            <li><strong>Seating:</strong> {meal}</li>
            <li><strong>Date:</strong> {date}</li>
            <li><strong>Time:</strong> {time}</li>
            <li><strong>Party:</strong> {guests}</li>
        </ul>
        <p>We will be in touch shortly to confirm your table.</p>
    </div>
</body>
</html>
"#,
        name = escape_html(&reservation.customer_name),
        time = escape_html(&reservation.time),
    );

    EmailBody::Inline {
        subject,
        html,
        text,
    }
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use supperclub_core::MealType;

    fn reservation(party_size: i32) -> ValidReservation {
        ValidReservation {
            party_size,
            meal_type: MealType::Dinner,
            date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
            time: "19:00".to_string(),
            email: "a.b@x.com".to_string(),
            phone: "555-0100".to_string(),
            customer_name: "A B".to_string(),
            special_requests: None,
        }
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        assert_eq!(format_date(date), "Tuesday, January 1, 2999");
    }

    #[test]
    fn test_template_params() {
        let params = template_params(&reservation(2));

        assert_eq!(params["partySize"], "2");
        assert_eq!(params["mealType"], "Dinner");
        assert_eq!(params["date"], "Tuesday, January 1, 2999");
        assert_eq!(params["time"], "19:00");
        assert_eq!(params["email"], "a.b@x.com");
        assert_eq!(params["phone"], "555-0100");
        assert_eq!(params["name"], "A B");
        assert_eq!(params["guests"], "2 guests");
        assert_eq!(params["specialRequests"], "");
    }

    #[test]
    fn test_customer_confirmation_pluralization() {
        let EmailBody::Inline { subject, text, .. } = customer_confirmation_inline(&reservation(1))
        else {
            panic!("expected inline body");
        };
        assert_eq!(subject, "We received your Dinner reservation request");
        assert!(text.contains("Hi A B,"));
        assert!(text.contains("Party: 1 guest\n"));
        assert!(text.contains("Date: Tuesday, January 1, 2999"));

        let EmailBody::Inline { text, .. } = customer_confirmation_inline(&reservation(6)) else {
            panic!("expected inline body");
        };
        assert!(text.contains("Party: 6 guests"));
    }

    #[test]
    fn test_restaurant_request_escapes_user_input() {
        let mut input = reservation(4);
        input.special_requests = Some("<b>window</b> & candles".to_string());

        let EmailBody::Inline {
            subject,
            html,
            text,
        } = restaurant_request_inline(&input)
        else {
            panic!("expected inline body");
        };

        assert_eq!(
            subject,
            "New Dinner reservation request: 4 guests on Tuesday, January 1, 2999"
        );
        assert!(html.contains("&lt;b&gt;window&lt;/b&gt; &amp; candles"));
        assert!(!html.contains("<b>window</b>"));
        assert!(text.contains("Special requests: <b>window</b> & candles"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
