use crate::utils::error::{Result, SalesError};

/// Destination for exported grid files.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Supplies the amounts consumed by input-driven script steps.
pub trait AmountSource {
    fn next_amount(&mut self) -> Result<i64>;

    /// 讀取固定數量的金額，不足時回報已讀取的數量
    fn take_amounts(&mut self, count: usize) -> Result<Vec<i64>> {
        let mut amounts = Vec::with_capacity(count);
        for _ in 0..count {
            match self.next_amount() {
                Ok(amount) => amounts.push(amount),
                Err(SalesError::InputExhausted { .. }) => {
                    return Err(SalesError::InputExhausted {
                        expected: count,
                        consumed: amounts.len(),
                    })
                }
                Err(e) => return Err(e),
            }
        }
        Ok(amounts)
    }
}
