/// Specifies the direction for ordering listed records.
///
/// # Purpose
/// Defines whether records should be sorted in ascending (low to high) or descending
/// (high to low) order. Used in list options to control result ordering.
///
/// # Variants
/// - `Ascending`: Sort from smallest to largest value (A to Z, 0 to 9, oldest to newest)
/// - `Descending`: Sort from largest to smallest value (Z to A, 9 to 0, newest to oldest)
///
/// # Usage
/// Used with the `order_by()` helper function when listing a store:
/// ```text
/// let options = order_by("age", SortOrder::Ascending);
/// let records = store.list(Some(&options))?;
/// ```
///
/// # Characteristics
/// - **Copy**: Can be copied instead of cloned
/// - **Comparable**: Can be compared for equality
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    #[default]
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}
