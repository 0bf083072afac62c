/// Revenue for one calendar month, keyed by its three-letter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}
