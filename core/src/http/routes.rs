//! Backend endpoint paths, relative to the configured base URL.

pub const REGISTER: &str = "/auth/register";
pub const LOGIN: &str = "/auth/login";
pub const PROFILE: &str = "/auth/me";

pub const TRANSACTIONS: &str = "/transactions";
pub const TRANSACTIONS_SUMMARY: &str = "/transactions/summary";

pub fn transaction(id: &str) -> String {
    format!("{TRANSACTIONS}/{id}")
}

pub const BUDGETS: &str = "/budgets";
pub const BUDGETS_BY_PERIOD: &str = "/budgets/by-period";

pub fn budget(id: &str) -> String {
    format!("{BUDGETS}/{id}")
}

pub const CATEGORIES: &str = "/categories";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_paths() {
        assert_eq!(transaction("t1"), "/transactions/t1");
        assert_eq!(budget("b9"), "/budgets/b9");
    }
}
