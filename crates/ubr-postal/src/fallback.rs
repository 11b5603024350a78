//! # Static Fallback Table
//!
//! Six well-known postal codes answered locally when the upstream directory
//! is unreachable. Keeps the address step of the form usable through an
//! outage for the metros most test traffic uses.

use ubr_core::PostalCode;

use crate::PostalRecord;

/// Look up a postal code in the static table.
pub fn lookup(code: &PostalCode) -> Option<PostalRecord> {
    let (city, state, post_office) = match code.as_str() {
        "110001" => ("New Delhi", "Delhi", "Connaught Place"),
        "400001" => ("Mumbai", "Maharashtra", "Fort"),
        "560001" => ("Bangalore", "Karnataka", "Bangalore GPO"),
        "600001" => ("Chennai", "Tamil Nadu", "Chennai GPO"),
        "700001" => ("Kolkata", "West Bengal", "Kolkata GPO"),
        "500001" => ("Hyderabad", "Telangana", "Hyderabad GPO"),
        _ => return None,
    };

    Some(PostalRecord {
        postal_code: code.clone(),
        city: city.to_string(),
        state: state.to_string(),
        country: "India".to_string(),
        post_office: post_office.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        let code = PostalCode::new("110001").unwrap();
        let record = lookup(&code).unwrap();
        assert_eq!(record.city, "New Delhi");
        assert_eq!(record.state, "Delhi");
        assert_eq!(record.country, "India");
        assert_eq!(record.post_office, "Connaught Place");
    }

    #[test]
    fn unknown_codes_do_not() {
        let code = PostalCode::new("999999").unwrap();
        assert!(lookup(&code).is_none());
    }
}
