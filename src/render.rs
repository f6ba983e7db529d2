//! Markup rendering for the detail panel and search results.
//!
//! Pure string formatting. Every untrusted value passes through `esc`
//! before it reaches markup, missing values render as a dash, numbers get
//! digit grouping, and record dates format in Hawaii standard time.

use chrono::{FixedOffset, TimeZone, Utc};
use num_format::{Buffer, Locale};

use crate::feature::{FieldValue, ParcelAttributes};

/// Rendered stand-in for a missing value.
pub const PLACEHOLDER: &str = "-";

const OWNER_NOT_LISTED_DETAIL: &str = "Not listed in this dataset";
const OWNER_NOT_LISTED_ROW: &str = "Owner not listed";
const ADDRESS_NOT_LISTED: &str = "Address not listed";

/// Escape text for insertion into markup.
pub fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Group integer digits and keep at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let negative = value < 0.0;
    let abs = value.abs();
    if abs >= 9.0e15 {
        // Past integer precision; grouping millis would be noise anyway.
        return value.to_string();
    }

    let millis = (abs * 1000.0).round() as u128;
    let int_part = millis / 1000;
    let frac = (millis % 1000) as u32;

    let mut grouped = Buffer::new();
    grouped.write_formatted(&int_part, &Locale::en);

    let mut out = String::new();
    if negative && millis > 0 {
        out.push('-');
    }
    out.push_str(grouped.as_str());
    if frac != 0 {
        let digits = format!("{frac:03}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Placeholder for missing/empty, grouped digits for numbers, escaped
/// text otherwise.
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => PLACEHOLDER.to_string(),
        FieldValue::Text(t) if t.is_empty() => PLACEHOLDER.to_string(),
        FieldValue::Text(t) => esc(t),
        FieldValue::Number(n) => format_number(*n),
    }
}

/// Epoch-millisecond value as `M/D/YYYY` in Hawaii standard time.
///
/// Zero, missing, and non-numeric values render the placeholder.
pub fn format_epoch_date(value: &FieldValue) -> String {
    let ms = match value.as_number() {
        Some(n) if n != 0.0 && n.is_finite() => n as i64,
        _ => return PLACEHOLDER.to_string(),
    };
    let Some(utc) = Utc.timestamp_millis_opt(ms).single() else {
        return PLACEHOLDER.to_string();
    };
    // UTC-10; Hawaii does not observe DST.
    let hst = FixedOffset::west_opt(10 * 3600).expect("offset in range");
    utc.with_timezone(&hst).format("%-m/%-d/%Y").to_string()
}

/// A plain notice for the detail panel ("map ready", "no parcel found").
pub fn render_notice(message: &str) -> String {
    format!("<p>{}</p>", esc(message))
}

/// The full detail panel for one parcel.
pub fn render_details(attrs: &ParcelAttributes) -> String {
    let owner = if attrs.landowner.is_blank() {
        FieldValue::text(OWNER_NOT_LISTED_DETAIL)
    } else {
        attrs.landowner.clone()
    };
    let tmk = attrs.tmk_text.or(&attrs.tmk);
    let lessee = attrs.lessee.or(&attrs.sub_lessee);
    let acres = attrs.recorded_area_acres.or(&attrs.gis_acres);

    let qpub = match attrs.qpub_link.as_text() {
        Some(link) if !link.trim().is_empty() => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">Open parcel details</a>"#,
            esc(link)
        ),
        _ => PLACEHOLDER.to_string(),
    };

    format!(
        r#"<dl class="kv">
  <dt>Owner</dt><dd>{owner}</dd>
  <dt>TMK</dt><dd>{tmk}</dd>
  <dt>Physical Address</dt><dd>{address}</dd>
  <dt>Lessee</dt><dd>{lessee}</dd>
  <dt>Area (acres)</dt><dd>{acres}</dd>
  <dt>Area (sq ft)</dt><dd>{sqft}</dd>
  <dt>Zone / Section / Plat</dt><dd>{zone} / {section} / {plat}</dd>
  <dt>Contact</dt><dd>{contact}</dd>
  <dt>Notes</dt><dd>{notes}</dd>
  <dt>Record Date</dt><dd>{date}</dd>
  <dt>Tax Record Link</dt><dd>{qpub}</dd>
</dl>"#,
        owner = format_value(&owner),
        tmk = format_value(tmk),
        address = format_value(&attrs.physical_address),
        lessee = format_value(lessee),
        acres = format_value(acres),
        sqft = format_value(&attrs.recorded_area_sqft),
        zone = format_value(&attrs.zone),
        section = format_value(&attrs.section),
        plat = format_value(&attrs.plat),
        contact = format_value(&attrs.contact_info),
        notes = format_value(&attrs.notes),
        date = format_epoch_date(&attrs.record_date),
        qpub = qpub,
    )
}

/// One clickable search-result row: owner in bold, TMK and address below.
pub fn render_result_row(attrs: &ParcelAttributes) -> String {
    let owner = match attrs.landowner.as_text() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => OWNER_NOT_LISTED_ROW.to_string(),
    };
    let tmk = attrs
        .tmk_text
        .or(&attrs.tmk)
        .raw()
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let address = attrs
        .physical_address
        .raw()
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| ADDRESS_NOT_LISTED.to_string());

    format!(
        "<strong>{}</strong><span>TMK {} | {}</span>",
        esc(&owner),
        esc(&tmk),
        esc(&address)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_covers_all_special_characters() {
        assert_eq!(
            esc(r#"<b>&"quoted"&'x'</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&amp;&#39;x&#39;&lt;/b&gt;"
        );
        assert_eq!(esc("plain text"), "plain text");
    }

    #[test]
    fn missing_values_render_placeholder() {
        assert_eq!(format_value(&FieldValue::Null), PLACEHOLDER);
        assert_eq!(format_value(&FieldValue::text("")), PLACEHOLDER);
        assert_eq!(format_value(&FieldValue::text("x")), "x");
        assert_eq!(format_value(&FieldValue::Number(0.0)), "0");
    }

    #[test]
    fn numbers_group_and_trim() {
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(2.1004), "2.1");
        assert_eq!(format_number(-43560.0), "-43,560");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn epoch_dates_format_in_hst() {
        // 2021-07-01T12:00:00Z is still 2021-07-01 at UTC-10.
        assert_eq!(
            format_epoch_date(&FieldValue::Number(1625140800000.0)),
            "7/1/2021"
        );
        // 2021-07-01T02:00:00Z rolls back to 6/30 in HST.
        assert_eq!(
            format_epoch_date(&FieldValue::Number(1625104800000.0)),
            "6/30/2021"
        );
        assert_eq!(format_epoch_date(&FieldValue::Number(0.0)), PLACEHOLDER);
        assert_eq!(format_epoch_date(&FieldValue::Null), PLACEHOLDER);
        assert_eq!(
            format_epoch_date(&FieldValue::text("yesterday")),
            PLACEHOLDER
        );
    }

    #[test]
    fn details_escape_injected_markup() {
        let attrs = ParcelAttributes {
            landowner: FieldValue::text("<script>alert(1)</script>"),
            ..Default::default()
        };
        let html = render_details(&attrs);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn details_fall_back_per_field() {
        let attrs = ParcelAttributes {
            tmk: FieldValue::Number(198001001.0),
            sub_lessee: FieldValue::text("SUB LLC"),
            gis_acres: FieldValue::Number(12.34),
            ..Default::default()
        };
        let html = render_details(&attrs);
        assert!(html.contains("Not listed in this dataset"));
        assert!(html.contains("<dt>TMK</dt><dd>198,001,001</dd>"));
        assert!(html.contains("<dt>Lessee</dt><dd>SUB LLC</dd>"));
        assert!(html.contains("<dt>Area (acres)</dt><dd>12.34</dd>"));
        // No cell is ever empty.
        assert!(!html.contains("<dd></dd>"));
    }

    #[test]
    fn record_link_only_when_present() {
        let mut attrs = ParcelAttributes::default();
        let html = render_details(&attrs);
        assert!(html.contains("<dt>Tax Record Link</dt><dd>-</dd>"));

        attrs.qpub_link = FieldValue::text("   ");
        assert!(render_details(&attrs).contains("<dt>Tax Record Link</dt><dd>-</dd>"));

        attrs.qpub_link = FieldValue::text("https://qpub.example/parcel?tmk=1&z=9");
        let html = render_details(&attrs);
        assert!(html.contains(
            r#"<a href="https://qpub.example/parcel?tmk=1&amp;z=9" target="_blank" rel="noopener noreferrer">Open parcel details</a>"#
        ));
    }

    #[test]
    fn result_row_fallbacks() {
        let attrs = ParcelAttributes::default();
        assert_eq!(
            render_result_row(&attrs),
            "<strong>Owner not listed</strong><span>TMK - | Address not listed</span>"
        );

        let attrs = ParcelAttributes {
            landowner: FieldValue::text("DOE, JOHN & JANE"),
            tmk_text: FieldValue::text("198001001"),
            physical_address: FieldValue::text("56-117 PUALALEA ST"),
            ..Default::default()
        };
        assert_eq!(
            render_result_row(&attrs),
            "<strong>DOE, JOHN &amp; JANE</strong><span>TMK 198001001 | 56-117 PUALALEA ST</span>"
        );
    }

    #[test]
    fn notice_is_escaped_paragraph() {
        assert_eq!(render_notice("a < b"), "<p>a &lt; b</p>");
    }
}
