//! Tracked instruments and their valuation.

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Price delta since the session opened.
    pub change: f64,
    pub change_pct: f64,
    pub quantity: u64,
    pub avg_price: f64,
}

impl Instrument {
    pub fn new(symbol: &str, name: &str, price: f64, quantity: u64, avg_price: f64) -> Self {
        Instrument {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change: 0.0,
            change_pct: 0.0,
            quantity,
            avg_price,
        }
    }

    /// An instrument that has already moved `change` since the previous close.
    pub fn with_change(symbol: &str, name: &str, price: f64, change: f64) -> Self {
        let mut inst = Instrument::new(symbol, name, price, 0, 0.0);
        inst.reprice(price, price - change);
        inst
    }

    /// Price the change figures are measured from.
    pub fn baseline(&self) -> f64 {
        self.price - self.change
    }

    pub fn market_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    pub fn invested(&self) -> f64 {
        self.quantity as f64 * self.avg_price
    }

    pub fn unrealized_pnl(&self) -> f64 {
        self.pnl_at(self.price)
    }

    /// P&L of the whole position if it were closed at `price`.
    pub fn pnl_at(&self, price: f64) -> f64 {
        (price - self.avg_price) * self.quantity as f64
    }

    pub fn unrealized_pnl_pct(&self) -> f64 {
        if self.avg_price == 0.0 {
            return 0.0;
        }
        (self.price - self.avg_price) / self.avg_price * 100.0
    }

    /// Move to `new_price`, recomputing change figures against `open_price`.
    pub fn reprice(&mut self, new_price: f64, open_price: f64) {
        self.price = new_price;
        self.change = new_price - open_price;
        self.change_pct = if open_price != 0.0 {
            self.change / open_price * 100.0
        } else {
            0.0
        };
    }
}
