//! Perceptron weight table.
//!
//! A direct-mapped array of weight vectors, one per table index. Each vector
//! holds a bias weight followed by one weight per history bit. Weights
//! saturate symmetrically at `±(2^(weight_bits-1) - 1)`.

/// Returns the saturation bound for a given weight width.
#[inline]
pub const fn max_magnitude(weight_bits: u32) -> i64 {
    (1i64 << (weight_bits - 1)) - 1
}

/// Adds `delta` to `w`, clamping the result to `[-max, max]`.
#[inline]
pub fn clamped_add(w: i32, delta: i32, max: i64) -> i32 {
    (i64::from(w) + i64::from(delta)).clamp(-max, max) as i32
}

/// Maps a history bit to its bipolar perceptron input.
#[inline]
pub const fn bipolar(bit: bool) -> i32 {
    if bit { 1 } else { -1 }
}

/// Reads history bit `i`, treating positions past the register as not-taken.
///
/// A history longer than the register leaves every weight past bit 31 with a
/// constant -1 input, so each of them trains like an extra bias weight.
#[inline]
pub const fn history_bit(ghr: u32, i: usize) -> bool {
    i < u32::BITS as usize && (ghr >> i) & 1 != 0
}

/// Table of saturating perceptron weights.
#[derive(Debug, Clone)]
pub struct WeightTable {
    /// Flattened weights, `row_size` per entry; the first of each row is the bias.
    table: Vec<i32>,
    /// Number of history weights per entry.
    history_length: usize,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Width of each weight in bits.
    weight_bits: u32,
}

impl WeightTable {
    /// Creates a zero-initialized table of `entries` weight vectors.
    pub fn new(entries: usize, history_length: usize, weight_bits: u32) -> Self {
        let row_size = history_length + 1;
        Self {
            table: vec![0; entries * row_size],
            history_length,
            row_size,
            weight_bits,
        }
    }

    /// Returns the saturation bound for this table's weight width.
    #[inline]
    pub const fn max_weight(&self) -> i64 {
        max_magnitude(self.weight_bits)
    }

    /// Returns the weight vector at `index`; element 0 is the bias.
    #[inline]
    pub fn read(&self, index: usize) -> &[i32] {
        let base = index * self.row_size;
        &self.table[base..base + self.row_size]
    }

    /// Computes the perceptron output for `index` against history `ghr`.
    ///
    /// Sums the bias weight and the product of each weight with the bipolar
    /// encoding of its history bit.
    pub fn output(&self, index: usize, ghr: u32) -> i64 {
        let row = self.read(index);
        let mut y = i64::from(row[0]);

        for (i, &w) in row[1..].iter().enumerate() {
            y += i64::from(w) * i64::from(bipolar(history_bit(ghr, i)));
        }
        y
    }

    /// Applies the perceptron learning rule to the entry at `index`.
    ///
    /// The bias moves toward the outcome; each history weight moves toward
    /// agreement between its history bit and the outcome.
    pub fn train(&mut self, index: usize, ghr: u32, taken: bool) {
        let max = self.max_weight();
        let t = bipolar(taken);
        let base = index * self.row_size;

        self.table[base] = clamped_add(self.table[base], t, max);

        for i in 0..self.history_length {
            let x = bipolar(history_bit(ghr, i));
            let w_idx = base + 1 + i;
            self.table[w_idx] = clamped_add(self.table[w_idx], t * x, max);
        }
    }
}
