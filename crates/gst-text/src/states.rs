//! GST state-code lookup table
//!
//! The two-digit codes printed next to state names on GST documents.
//! The table covers the 28 states and 8 union territories; lookups are
//! case-insensitive and whitespace-trimmed, and unmatched names simply
//! yield no code (the annotation is omitted, never an error).

/// State/UT name to two-digit GST state code.
pub const STATE_CODES: [(&str, &str); 36] = [
    ("Andhra Pradesh", "37"),
    ("Arunachal Pradesh", "12"),
    ("Assam", "18"),
    ("Bihar", "10"),
    ("Chhattisgarh", "22"),
    ("Delhi", "07"),
    ("Goa", "30"),
    ("Gujarat", "24"),
    ("Haryana", "06"),
    ("Himachal Pradesh", "02"),
    ("Jharkhand", "20"),
    ("Karnataka", "29"),
    ("Kerala", "32"),
    ("Madhya Pradesh", "23"),
    ("Maharashtra", "27"),
    ("Manipur", "14"),
    ("Meghalaya", "17"),
    ("Mizoram", "15"),
    ("Nagaland", "13"),
    ("Odisha", "21"),
    ("Punjab", "03"),
    ("Rajasthan", "08"),
    ("Sikkim", "11"),
    ("Tamil Nadu", "33"),
    ("Telangana", "36"),
    ("Tripura", "16"),
    ("Uttar Pradesh", "09"),
    ("Uttarakhand", "05"),
    ("West Bengal", "19"),
    ("Jammu and Kashmir", "01"),
    ("Ladakh", "38"),
    ("Chandigarh", "04"),
    ("Puducherry", "34"),
    ("Lakshadweep", "31"),
    ("Dadra and Nagar Haveli and Daman and Diu", "26"),
    ("Andaman and Nicobar Islands", "35"),
];

/// Look up the two-digit GST code for a state name.
///
/// Matching is case-insensitive over the trimmed name. Returns `None` for
/// empty or unknown names.
pub fn state_code(name: &str) -> Option<&'static str> {
    let normalized = name.trim();
    if normalized.is_empty() {
        return None;
    }
    STATE_CODES
        .iter()
        .find(|(state, _)| state.eq_ignore_ascii_case(normalized))
        .map(|(_, code)| *code)
}

/// Trimmed, case-insensitive state equality — decides the intra-state
/// (CGST+SGST) vs inter-state (IGST) tax split.
pub fn same_state(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
