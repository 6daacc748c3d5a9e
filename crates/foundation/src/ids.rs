/// Insertion sequence number. Strictly increasing per generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(u64);

impl Seq {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SeqGen {
    next: u64,
}

impl SeqGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Seq {
        let s = Seq(self.next);
        self.next += 1;
        s
    }
}
