use crate::games::SessionRng;

/// The random choices the bot makes while picking a move.
pub trait MoveRng {
    /// A uniform draw from `0..10`, compared against the difficulty.
    fn gate_draw(&mut self) -> u32;

    fn coin(&mut self) -> bool;

    /// A uniform index into a non-empty slice of length `len`.
    fn pick(&mut self, len: usize) -> usize;
}

impl MoveRng for SessionRng {
    fn gate_draw(&mut self) -> u32 {
        self.below(10) as u32
    }

    fn coin(&mut self) -> bool {
        self.flip()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.below(len)
    }
}
