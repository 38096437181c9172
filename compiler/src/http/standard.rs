use super::dialect::Dialect;

const COUNT_SUB_PATH: &str = "count";
const FILTER_KEY: &str = "filter";
const PROPERTIES_KEY: &str = "properties";
const SORT_KEY: &str = "sort";
const PAGE_KEY: &str = "page";
const PAGE_SIZE_KEY: &str = "pageSize";
const INCLUDE_KEY: &str = "includeReferencedEntities";
const IGNORE_MISSING_PROPERTIES_KEY: &str = "ignoreMissingProperties";

/// The resource API as the provider ships it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standard();

impl Dialect for Standard {
    fn count_path(&self, resource: &str) -> String {
        format!("{resource}/{COUNT_SUB_PATH}")
    }

    fn filter_key(&self, position: usize) -> String {
        // The first expression is `filter`, then `filter2`, `filter3`, ...
        if position <= 1 {
            FILTER_KEY.to_string()
        } else {
            format!("{FILTER_KEY}{position}")
        }
    }

    fn properties_key(&self) -> &str {
        PROPERTIES_KEY
    }

    fn sort_key(&self) -> &str {
        SORT_KEY
    }

    fn page_key(&self) -> &str {
        PAGE_KEY
    }

    fn page_size_key(&self) -> &str {
        PAGE_SIZE_KEY
    }

    fn include_key(&self) -> &str {
        INCLUDE_KEY
    }

    fn ignore_missing_properties_key(&self) -> &str {
        IGNORE_MISSING_PROPERTIES_KEY
    }
}
