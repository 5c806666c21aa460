// Dense user-by-merchant matrix of mean spend.
//
// Groups transactions by (user, merchant) and takes the arithmetic mean of
// the amounts in each group. Any pair never observed is 0.0 — "unvisited"
// is defined as a 0.0 cell, which also means a user whose recorded mean at
// a merchant is exactly zero is indistinguishable from one who never went
// there. That matches the upstream data contract.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::db::models::Transaction;

/// Mean spend per (user, merchant), zero-filled where unobserved.
///
/// Users and merchants are held in lexicographic order, so row and column
/// layout is stable regardless of input order.
#[derive(Debug, Clone)]
pub struct SpendMatrix {
    users: Vec<String>,
    merchants: Vec<String>,
    user_index: HashMap<String, usize>,
    /// rows[u][m] = mean spend of users[u] at merchants[m]
    rows: Vec<Vec<f64>>,
}

impl SpendMatrix {
    /// Build the matrix from a transaction snapshot.
    ///
    /// An empty input produces an empty matrix (zero rows, zero columns).
    pub fn build(transactions: &[Transaction]) -> Self {
        // Sum and count per (user, merchant); BTreeMap gives the sorted
        // user/merchant sets for free.
        let mut groups: BTreeMap<(&str, &str), (f64, u64)> = BTreeMap::new();
        let mut merchant_set: BTreeSet<&str> = BTreeSet::new();

        for t in transactions {
            let entry = groups
                .entry((t.user_id.as_str(), t.merchant.as_str()))
                .or_insert((0.0, 0));
            entry.0 += t.amount;
            entry.1 += 1;
            merchant_set.insert(t.merchant.as_str());
        }

        let merchants: Vec<String> = merchant_set.iter().map(|m| m.to_string()).collect();

        let mut users: Vec<String> = Vec::new();
        for (user, _) in groups.keys() {
            if users.last().map(String::as_str) != Some(*user) {
                users.push(user.to_string());
            }
        }

        let user_index: HashMap<String, usize> = users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.clone(), i))
            .collect();

        let mut rows = vec![vec![0.0; merchants.len()]; users.len()];
        for ((user, merchant), (sum, count)) in &groups {
            let u = user_index[*user];
            let m = merchants
                .binary_search_by(|probe| probe.as_str().cmp(merchant))
                .expect("merchant collected above");
            rows[u][m] = sum / *count as f64;
        }

        Self {
            users,
            merchants,
            user_index,
            rows,
        }
    }

    /// Distinct user ids, sorted.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Distinct merchants, sorted.
    pub fn merchants(&self) -> &[String] {
        &self.merchants
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn merchant_count(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_index.contains_key(user_id)
    }

    /// The full spend row for a user, aligned with `merchants()`.
    pub fn row(&self, user_id: &str) -> Option<&[f64]> {
        self.user_index
            .get(user_id)
            .map(|&i| self.rows[i].as_slice())
    }

    /// Mean spend for a (user, merchant) pair; 0.0 when unobserved or when
    /// either id is unknown.
    pub fn spend(&self, user_id: &str, merchant: &str) -> f64 {
        let Some(row) = self.row(user_id) else {
            return 0.0;
        };
        match self
            .merchants
            .binary_search_by(|probe| probe.as_str().cmp(merchant))
        {
            Ok(m) => row[m],
            Err(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(user: &str, merchant: &str, amount: f64) -> Transaction {
        Transaction {
            user_id: user.to_string(),
            merchant: merchant.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: "Dining".to_string(),
            city: "Chicago".to_string(),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_matrix() {
        let matrix = SpendMatrix::build(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.user_count(), 0);
        assert_eq!(matrix.merchant_count(), 0);
    }

    #[test]
    fn test_mean_per_group() {
        let matrix = SpendMatrix::build(&[
            tx("U1", "Cafe", 10.0),
            tx("U1", "Cafe", 20.0),
            tx("U1", "Cafe", 30.0),
        ]);
        assert!((matrix.spend("U1", "Cafe") - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unobserved_pairs_are_zero() {
        let matrix = SpendMatrix::build(&[tx("U1", "Cafe", 10.0), tx("U2", "Grocer", 50.0)]);
        assert_eq!(matrix.spend("U1", "Grocer"), 0.0);
        assert_eq!(matrix.spend("U2", "Cafe"), 0.0);
        // Unknown ids are also zero, not a panic
        assert_eq!(matrix.spend("U9", "Cafe"), 0.0);
        assert_eq!(matrix.spend("U1", "Nowhere"), 0.0);
    }

    #[test]
    fn test_rows_cover_full_merchant_set() {
        let matrix = SpendMatrix::build(&[tx("U1", "Cafe", 10.0), tx("U2", "Grocer", 50.0)]);
        let row = matrix.row("U1").unwrap();
        assert_eq!(row.len(), matrix.merchant_count());
    }

    #[test]
    fn test_order_is_sorted_and_input_independent() {
        let a = SpendMatrix::build(&[
            tx("U2", "Grocer", 50.0),
            tx("U1", "Cafe", 10.0),
            tx("U1", "Bakery", 5.0),
        ]);
        let b = SpendMatrix::build(&[
            tx("U1", "Bakery", 5.0),
            tx("U1", "Cafe", 10.0),
            tx("U2", "Grocer", 50.0),
        ]);
        assert_eq!(a.users(), &["U1".to_string(), "U2".to_string()]);
        assert_eq!(a.users(), b.users());
        assert_eq!(a.merchants(), b.merchants());
        assert_eq!(
            a.merchants(),
            &[
                "Bakery".to_string(),
                "Cafe".to_string(),
                "Grocer".to_string()
            ]
        );
    }

    #[test]
    fn test_negative_amounts_flow_through() {
        // Refunds are signed; a net-negative mean is a valid cell value
        let matrix = SpendMatrix::build(&[tx("U1", "Cafe", 10.0), tx("U1", "Cafe", -30.0)]);
        assert!((matrix.spend("U1", "Cafe") - (-10.0)).abs() < f64::EPSILON);
    }
}
