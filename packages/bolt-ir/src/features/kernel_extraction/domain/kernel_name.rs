//! Kernel name generator
//!
//! `kernel_A` .. `kernel_Z`, `kernel_AA`, `kernel_AB`, .. (bijective base 26).
//! One generator spans the whole program so names never collide across
//! functions.

#[derive(Debug, Clone, Default)]
pub struct KernelNameGenerator {
    issued: usize,
}

impl KernelNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the next call to [`next_name`](Self::next_name) will return
    pub fn peek(&self) -> String {
        format!("kernel_{}", letters(self.issued + 1))
    }

    pub fn next_name(&mut self) -> String {
        let name = self.peek();
        self.issued += 1;
        name
    }
}

fn letters(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_rolls_over_to_two_letters() {
        let mut names = KernelNameGenerator::new();
        let issued: Vec<String> = (0..28).map(|_| names.next_name()).collect();
        assert_eq!(issued[0], "kernel_A");
        assert_eq!(issued[25], "kernel_Z");
        assert_eq!(issued[26], "kernel_AA");
        assert_eq!(issued[27], "kernel_AB");
        assert_eq!(names.peek(), "kernel_AC");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut names = KernelNameGenerator::new();
        assert_eq!(names.peek(), "kernel_A");
        assert_eq!(names.next_name(), "kernel_A");
        assert_eq!(names.peek(), "kernel_B");
    }

    #[test]
    fn test_never_exhausted() {
        assert_eq!(letters(26 * 26 + 26), "ZZ");
        assert_eq!(letters(26 * 26 + 27), "AAA");
    }
}
