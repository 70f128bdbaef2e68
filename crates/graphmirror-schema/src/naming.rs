//! Identifier normalisation.
//!
//! Graph labels, relationship types and property keys are free-form strings
//! (`PART_OF`, `customer order`, `ORDER_DATE`). Both functions here split on
//! runs of underscores and whitespace and re-join the non-empty segments in
//! camel case. They are total: an identifier made only of separators yields
//! an empty string, which callers must reject.

fn segments(identifier: &str) -> impl Iterator<Item = &str> {
    identifier
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
}

fn push_title_case(out: &mut String, segment: &str) {
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

/// Upper-camel class name: `PART_OF` → `PartOf`, `customer order` → `CustomerOrder`.
pub fn class_name_of(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for segment in segments(identifier) {
        push_title_case(&mut out, segment);
    }
    out
}

/// Lower-camel field name: `ORDER_DATE` → `orderDate`.
///
/// The first non-empty segment is lowercased entirely; the rest are title-cased.
pub fn field_name_of(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for (i, segment) in segments(identifier).enumerate() {
        if i == 0 {
            out.push_str(&segment.to_lowercase());
        } else {
            push_title_case(&mut out, segment);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_join_title_cased_segments() {
        assert_eq!(class_name_of("PART_OF"), "PartOf");
        assert_eq!(class_name_of("customer order"), "CustomerOrder");
        assert_eq!(class_name_of("order_item"), "OrderItem");
        assert_eq!(class_name_of("ships to"), "ShipsTo");
        assert_eq!(class_name_of("PERSON"), "Person");
    }

    #[test]
    fn class_names_collapse_separator_runs() {
        assert_eq!(class_name_of("__HAS__ \t PART_"), "HasPart");
        assert_eq!(class_name_of("a  b"), "AB");
    }

    #[test]
    fn field_names_are_lower_camel() {
        assert_eq!(field_name_of("ORDER_DATE"), "orderDate");
        assert_eq!(field_name_of("name"), "name");
        assert_eq!(field_name_of("KNOWS"), "knows");
        assert_eq!(field_name_of("first name"), "firstName");
    }

    #[test]
    fn field_names_skip_leading_separators() {
        assert_eq!(field_name_of("_internal_id"), "internalId");
    }

    #[test]
    fn mixed_case_segments_are_flattened() {
        // Only the first character of a segment survives as upper case.
        assert_eq!(class_name_of("createdBy"), "Createdby");
        assert_eq!(field_name_of("createdBy"), "createdby");
    }

    #[test]
    fn separator_only_identifiers_normalise_to_empty() {
        assert_eq!(class_name_of("___"), "");
        assert_eq!(field_name_of(" _ "), "");
    }

    #[test]
    fn non_ascii_segments_are_case_mapped() {
        assert_eq!(class_name_of("ÉCOLE_élève"), "ÉcoleÉlève");
        assert_eq!(field_name_of("ÉCOLE_élève"), "écoleÉlève");
    }
}
