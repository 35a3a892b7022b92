/// Integer printed with `'` between groups of three digits, e.g. `1'048'576`.
pub struct NiceInt(u64);

impl NiceInt {
    pub fn from_usize(value: usize) -> Self {
        Self(value as u64)
    }
}

impl From<u64> for NiceInt {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NiceInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", with_delimiters(self.0))
    }
}

fn with_delimiters(value: u64) -> String {
    value
        .to_string()
        .chars()
        .rev()
        .collect::<Vec<char>>()
        .chunks(3)
        .map(|c| c.iter().rev().collect::<String>())
        .rev()
        .collect::<Vec<String>>()
        .join("'")
}
