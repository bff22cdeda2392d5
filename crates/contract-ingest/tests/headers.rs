use std::collections::HashSet;

use proptest::prelude::*;

use contract_ingest::unique_headers;

proptest! {
    #[test]
    fn headers_are_unique_and_keep_their_count(
        raw in prop::collection::vec(prop::option::of("(Name|Status|__EMPTY|Name_1|[a-c]{1,2})"), 0..12)
    ) {
        let headers = unique_headers(raw.clone());
        prop_assert_eq!(headers.len(), raw.len());
        let distinct: HashSet<&String> = headers.iter().collect();
        prop_assert_eq!(distinct.len(), headers.len());
    }

    #[test]
    fn first_occurrence_keeps_its_name(
        raw in prop::collection::vec(prop::option::of("[a-d]"), 1..10)
    ) {
        let headers = unique_headers(raw.clone());
        if let Some(Some(first)) = raw.first() {
            prop_assert_eq!(&headers[0], first);
        }
    }
}
