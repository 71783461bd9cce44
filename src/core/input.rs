use crate::domain::ports::AmountSource;
use crate::utils::error::{Result, SalesError};
use std::collections::VecDeque;
use std::io::BufRead;

/// Reads whitespace-separated integers from any buffered reader, one line at a time.
pub struct ReaderAmountSource<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
    consumed: usize,
}

impl<R: BufRead> ReaderAmountSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            consumed: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

impl ReaderAmountSource<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> AmountSource for ReaderAmountSource<R> {
    fn next_amount(&mut self) -> Result<i64> {
        let token = self.next_token()?.ok_or(SalesError::InputExhausted {
            expected: self.consumed + 1,
            consumed: self.consumed,
        })?;

        let amount = token.parse::<i64>().map_err(|_| SalesError::InputFormat {
            token: token.clone(),
            position: self.consumed + 1,
        })?;

        self.consumed += 1;
        tracing::debug!(position = self.consumed, amount, "amount read");
        Ok(amount)
    }
}
