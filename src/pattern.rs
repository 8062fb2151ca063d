//! Decorative block pattern derived from a URL.
//!
//! Looks like a scannable code (three finder "eyes" plus noise) but encodes
//! nothing. The same URL always yields the same grid.

const EYE: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
  size: usize,
  cells: Vec<bool>,
}

/// FNV-1a over the URL bytes.
fn checksum(url: &str) -> u64 {
  url.bytes().fold(0xcbf2_9ce4_8422_2325, |acc, b| (acc ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3))
}

/// xorshift64 stream seeded from the checksum.
struct Bits(u64);

impl Bits {
  fn next(&mut self) -> bool {
    let mut x = self.0;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    self.0 = x;
    x & 1 == 1
  }
}

/// Which finder eye (if any) covers a cell, as the cell's offset inside it.
fn eye_offset(size: usize, row: usize, col: usize) -> Option<(usize, usize)> {
  let far = size.saturating_sub(EYE);
  let in_top = row < EYE;
  let in_left = col < EYE;
  let in_right = col >= far;
  let in_bottom = row >= far;
  if in_top && in_left {
    Some((row, col))
  } else if in_top && in_right {
    Some((row, col - far))
  } else if in_bottom && in_left {
    Some((row - far, col))
  } else {
    None
  }
}

fn eye_cell(r: usize, c: usize) -> bool {
  let ring = r == 0 || r == EYE - 1 || c == 0 || c == EYE - 1;
  let core = (2..=4).contains(&r) && (2..=4).contains(&c);
  ring || core
}

impl Pattern {
  pub fn from_url(url: &str, size: usize) -> Self {
    let size = size.max(EYE);
    let mut bits = Bits(checksum(url) | 1);
    let mut cells = Vec::with_capacity(size * size);
    for row in 0..size {
      for col in 0..size {
        let on = match eye_offset(size, row, col) {
          Some((r, c)) => eye_cell(r, c),
          None => bits.next(),
        };
        cells.push(on);
      }
    }
    Self { size, cells }
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn is_set(&self, row: usize, col: usize) -> bool {
    row < self.size && col < self.size && self.cells.get(row * self.size + col).copied().unwrap_or(false)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_url_same_pattern() {
    let a = Pattern::from_url("https://youtu.be/abc123", 21);
    let b = Pattern::from_url("https://youtu.be/abc123", 21);
    assert_eq!(a, b);
  }

  #[test]
  fn different_urls_usually_differ() {
    let a = Pattern::from_url("https://youtu.be/abc123", 21);
    let b = Pattern::from_url("https://youtu.be/abc124", 21);
    assert_ne!(a, b);
  }

  #[test]
  fn eyes_sit_in_three_corners() {
    let p = Pattern::from_url("https://vimeo.com/1", 21);
    for (r0, c0) in [(0, 0), (0, 14), (14, 0)] {
      assert!(p.is_set(r0, c0));
      assert!(!p.is_set(r0 + 1, c0 + 1));
      assert!(p.is_set(r0 + 3, c0 + 3));
    }
  }

  #[test]
  fn out_of_bounds_is_unset() {
    let p = Pattern::from_url("x", 21);
    assert_eq!(p.size(), 21);
    assert!(!p.is_set(21, 0));
    assert!(!p.is_set(0, 99));
  }
}
