//! Live holdings set and the session-open price baseline.

use std::collections::HashMap;

use super::instrument::Instrument;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Portfolio {
    instruments: Vec<Instrument>,
    open_prices: HashMap<String, f64>,
}

impl Portfolio {
    /// Build from a seed list. Each instrument's baseline (current price less
    /// any change it carries) becomes its open price for the rest of the
    /// session.
    pub fn new(seed: Vec<Instrument>) -> Self {
        let mut portfolio = Portfolio::default();
        for instrument in seed {
            portfolio.add_instrument(instrument);
        }
        portfolio
    }

    /// Add or replace an instrument. The open price is only captured the
    /// first time a symbol is seen.
    pub fn add_instrument(&mut self, instrument: Instrument) {
        self.open_prices
            .entry(instrument.symbol.clone())
            .or_insert(instrument.baseline());
        match self
            .instruments
            .iter_mut()
            .find(|i| i.symbol == instrument.symbol)
        {
            Some(existing) => *existing = instrument,
            None => self.instruments.push(instrument),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    pub fn get_mut(&mut self, symbol: &str) -> Option<&mut Instrument> {
        self.instruments.iter_mut().find(|i| i.symbol == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn remove(&mut self, symbol: &str) -> Option<Instrument> {
        let idx = self.instruments.iter().position(|i| i.symbol == symbol)?;
        Some(self.instruments.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn open_price(&self, symbol: &str) -> Option<f64> {
        self.open_prices.get(symbol).copied()
    }
}
