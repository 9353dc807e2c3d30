//! Type-ahead suggestions for the form's area and business type fields.

/// Known cities and neighbourhoods in India.
pub const AREAS: &[&str] = &[
    "Mumbai, Maharashtra",
    "South Mumbai, Mumbai",
    "Bandra West, Mumbai",
    "Andheri East, Mumbai",
    "Powai, Mumbai",
    "Pune, Maharashtra",
    "Koregaon Park, Pune",
    "Hinjewadi, Pune",
    "Delhi, NCR",
    "Connaught Place, New Delhi",
    "Hauz Khas, New Delhi",
    "Gurugram, Haryana",
    "Cyber City, Gurugram",
    "Noida, Uttar Pradesh",
    "Bengaluru, Karnataka",
    "Koramangala, Bengaluru",
    "Indiranagar, Bengaluru",
    "HSR Layout, Bengaluru",
    "Whitefield, Bengaluru",
    "Jayanagar, Bengaluru",
    "Hyderabad, Telangana",
    "Banjara Hills, Hyderabad",
    "Gachibowli, Hyderabad",
    "Chennai, Tamil Nadu",
    "T. Nagar, Chennai",
    "Anna Nagar, Chennai",
    "Kolkata, West Bengal",
    "Park Street, Kolkata",
    "Salt Lake, Kolkata",
    "Ahmedabad, Gujarat",
    "Jaipur, Rajasthan",
    "Lucknow, Uttar Pradesh",
    "Chandigarh",
    "Kochi, Kerala",
    "Indore, Madhya Pradesh",
    "Mysuru, Karnataka",
    "Goa",
];

/// Common small and medium business formats.
pub const BUSINESS_TYPES: &[&str] = &[
    "Cloud Kitchen",
    "Boutique Cafe",
    "Quick Service Restaurant",
    "Fine Dining Restaurant",
    "Bakery",
    "Juice Bar",
    "Craft Brewery",
    "Grocery Store",
    "Organic Food Store",
    "Pharmacy",
    "Gym / Fitness Studio",
    "Yoga Studio",
    "Salon & Spa",
    "Co-working Space",
    "Coaching Centre",
    "Preschool / Daycare",
    "Pet Store",
    "Clothing Boutique",
    "Electronics Store",
    "Mobile Repair Shop",
    "Laundry Service",
    "Dental Clinic",
    "Diagnostic Lab",
    "Bookstore",
    "Furniture Showroom",
];

/// Entries containing `input`, case-insensitively, in list order.
///
/// Blank input yields nothing so the suggestion list stays closed.
pub fn filter(entries: &[&str], input: &str) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter(|e| e.to_lowercase().contains(&needle))
        .map(|e| e.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_substring_case_insensitive() {
        let hits = filter(AREAS, "bengaluru");
        assert!(hits.contains(&"Koramangala, Bengaluru".to_string()));
        assert!(hits.contains(&"Bengaluru, Karnataka".to_string()));
        assert!(hits.iter().all(|h| h.to_lowercase().contains("bengaluru")));
    }

    #[test]
    fn test_filter_keeps_list_order() {
        assert_eq!(
            filter(BUSINESS_TYPES, "CAFE"),
            vec!["Boutique Cafe".to_string()]
        );
        let stores = filter(BUSINESS_TYPES, "store");
        assert_eq!(stores.first().map(String::as_str), Some("Grocery Store"));
    }

    #[test]
    fn test_filter_blank_input() {
        assert!(filter(AREAS, "").is_empty());
        assert!(filter(AREAS, "   ").is_empty());
        assert!(filter(AREAS, "zzz").is_empty());
    }
}
