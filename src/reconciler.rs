use rust_decimal::Decimal;

use crate::error::ConvertError;

#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileResult {
    pub is_reconciled: bool,
    pub statement_balance: Decimal,
    pub calculated_balance: Decimal,
    pub discrepancy: Decimal,
}

impl ReconcileResult {
    pub fn into_result(self) -> Result<ReconcileResult, ConvertError> {
        if self.is_reconciled {
            Ok(self)
        } else {
            log::warn!("running balance is off by {}", self.discrepancy);
            Err(ConvertError::BalanceMismatch {
                calculated: self.calculated_balance,
                closing: self.statement_balance,
            })
        }
    }
}

/// Running balance from the opening balance through each transaction.
#[derive(Debug, Clone)]
pub struct Reconciler {
    running: Decimal,
    count: usize,
}

impl Reconciler {
    pub fn new(opening_balance: Decimal) -> Self {
        Self {
            running: opening_balance,
            count: 0,
        }
    }

    /// Add one transaction and return the balance after it.
    pub fn add(&mut self, amount: Decimal) -> Decimal {
        self.running += amount;
        self.count += 1;
        self.running
    }

    /// Compare against the stated closing balance. Equality is exact; both sides are in cents.
    pub fn finish(self, closing_balance: Decimal) -> ReconcileResult {
        let discrepancy = (self.running - closing_balance).abs();
        log::debug!(
            "reconciled {} transactions: calculated {}, closing {closing_balance}",
            self.count,
            self.running
        );
        ReconcileResult {
            is_reconciled: discrepancy.is_zero(),
            statement_balance: closing_balance,
            calculated_balance: self.running,
            discrepancy,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn reconcile<const N: usize>(opening: Decimal, amounts: [Decimal; N], closing: Decimal) -> ReconcileResult {
        let mut reconciler = Reconciler::new(opening);
        for amount in amounts {
            reconciler.add(amount);
        }
        reconciler.finish(closing)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_matching_balance() {
        let result = reconcile(dec("1000.00"), [dec("-200.00"), dec("50.25")], dec("850.25"));
        assert!(result.is_reconciled);
        assert!(result.discrepancy.is_zero());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_off_by_one_cent() {
        let result = reconcile(dec("1000.00"), [dec("-200.00")], dec("800.01"));
        assert!(!result.is_reconciled);
        assert_eq!(result.discrepancy, dec("0.01"));
        assert_eq!(result.calculated_balance, dec("800.00"));
        let err = result.into_result().unwrap_err();
        assert!(matches!(err, ConvertError::BalanceMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "final calculated balance 800.00 does not match closing balance 800.01"
        );
    }

    #[test]
    fn test_no_transactions() {
        assert!(reconcile(dec("12.00"), [], dec("12.00")).is_reconciled);
        assert!(!reconcile(dec("12.00"), [], dec("-12.00")).is_reconciled);
    }

    #[test]
    fn test_running_balance_per_step() {
        let mut r = Reconciler::new(dec("10.00"));
        assert_eq!(r.add(dec("-2.50")), dec("7.50"));
        assert_eq!(r.add(dec("1.00")), dec("8.50"));
        assert!(r.finish(dec("8.50")).is_reconciled);
    }
}
