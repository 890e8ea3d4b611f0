//! Locale label packs.
//!
//! One pack per receipt language; the fixture builder is parameterized by a
//! pack and nothing else changes between languages. Packs are `Deserialize`
//! so custom ones can be loaded from JSON.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct LocalePack {
    pub store_name: String,
    pub street: String,
    pub city: String,
    /// Includes trailing punctuation where the locale uses it ("Date:").
    pub date_label: String,
    pub time_label: String,
    /// No trailing colon ("Receipt #", "Kuitti nro").
    pub receipt_no_label: String,
    pub items_label: String,
    pub subtotal_label: String,
    /// VAT term, rate appended at build time ("ALV" -> "ALV 24%:").
    pub tax_label: String,
    pub total_tax_label: String,
    pub total_label: String,
    pub payment_label: String,
    pub payment_method: String,
    pub footer: String,
    pub table_header: [String; 4],
    pub currency: String,
}

/// Built-in pack for a language tag, `None` for unknown tags.
pub fn builtin(tag: &str) -> Option<LocalePack> {
    Some(match tag {
        "en" => LocalePack {
            store_name: "SUPERMARKET ABC".into(),
            street: "123 Main Street".into(),
            city: "Helsinki, FI".into(),
            date_label: "Date:".into(),
            time_label: "Time:".into(),
            receipt_no_label: "Receipt #".into(),
            items_label: "Items:".into(),
            subtotal_label: "Subtotal:".into(),
            tax_label: "Tax".into(),
            total_tax_label: "Total Tax:".into(),
            total_label: "TOTAL:".into(),
            payment_label: "Payment:".into(),
            payment_method: "CARD".into(),
            footer: "Thank you!".into(),
            table_header: ["Tax rate".into(), "Tax".into(), "Subtotal".into(), "Total".into()],
            currency: "€".into(),
        },
        "fi" => LocalePack {
            store_name: "SUPERMARKET ABC".into(),
            street: "123 Pääkatu".into(),
            city: "Helsinki, FI".into(),
            date_label: "Päivämäärä:".into(),
            time_label: "Aika:".into(),
            receipt_no_label: "Kuitti nro".into(),
            items_label: "Tuotteet:".into(),
            subtotal_label: "Välisumma:".into(),
            tax_label: "ALV".into(),
            total_tax_label: "Verot yhteensä:".into(),
            total_label: "YHTEENSÄ:".into(),
            payment_label: "Maksutapa:".into(),
            payment_method: "KORTTI".into(),
            footer: "Kiitos!".into(),
            table_header: ["Verokanta".into(), "Vero".into(), "Välisumma".into(), "Yhteensä".into()],
            currency: "€".into(),
        },
        "de" => LocalePack {
            store_name: "SUPERMARKET ABC".into(),
            street: "123 Hauptstraße".into(),
            city: "Berlin, DE".into(),
            date_label: "Datum:".into(),
            time_label: "Uhrzeit:".into(),
            receipt_no_label: "Rechnung Nr.".into(),
            items_label: "Artikel:".into(),
            subtotal_label: "Zwischensumme:".into(),
            tax_label: "MWST".into(),
            total_tax_label: "Steuer gesamt:".into(),
            total_label: "GESAMT:".into(),
            payment_label: "Zahlung:".into(),
            payment_method: "KARTE".into(),
            footer: "Vielen Dank!".into(),
            table_header: ["Steuersatz".into(), "Steuer".into(), "Zwischensumme".into(), "Gesamt".into()],
            currency: "€".into(),
        },
        "sv" => LocalePack {
            store_name: "SUPERMARKET ABC".into(),
            street: "123 Huvudgatan".into(),
            city: "Stockholm, SE".into(),
            date_label: "Datum:".into(),
            time_label: "Tid:".into(),
            receipt_no_label: "Kvitto nr".into(),
            items_label: "Varor:".into(),
            subtotal_label: "Delsumma:".into(),
            tax_label: "MOMS".into(),
            total_tax_label: "Total moms:".into(),
            total_label: "TOTALT:".into(),
            payment_label: "Betalning:".into(),
            payment_method: "KORT".into(),
            footer: "Tack!".into(),
            table_header: ["Skattesats".into(), "Moms".into(), "Delsumma".into(), "Totalt".into()],
            currency: "€".into(),
        },
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tags_resolve() {
        for tag in ["en", "fi", "de", "sv"] {
            let pack = builtin(tag).unwrap();
            assert!(!pack.footer.is_empty(), "{tag} pack has no footer");
            assert_eq!(pack.currency, "€");
        }
        assert!(builtin("xx").is_none());
    }

    #[test]
    fn finnish_uses_alv() {
        let pack = builtin("fi").unwrap();
        assert_eq!(pack.tax_label, "ALV");
        assert_eq!(pack.payment_method, "KORTTI");
        assert_eq!(pack.total_label, "YHTEENSÄ:");
    }

    #[test]
    fn pack_loads_from_json() {
        let json = r#"{
            "store_name": "KIOSK",
            "street": "1 High St",
            "city": "London, UK",
            "date_label": "Date:",
            "time_label": "Time:",
            "receipt_no_label": "Receipt #",
            "items_label": "Items:",
            "subtotal_label": "Subtotal:",
            "tax_label": "VAT",
            "total_tax_label": "Total VAT:",
            "total_label": "TOTAL:",
            "payment_label": "Payment:",
            "payment_method": "CASH",
            "footer": "Cheers!",
            "table_header": ["Rate", "VAT", "Net", "Gross"],
            "currency": "£"
        }"#;
        let pack: LocalePack = serde_json::from_str(json).unwrap();
        assert_eq!(pack.tax_label, "VAT");
        assert_eq!(pack.currency, "£");
    }
}
