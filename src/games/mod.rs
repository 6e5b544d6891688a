// Toy games used to exercise self-play agents

pub mod count;
pub mod narrow;
pub mod bandit;
pub mod rock_paper_scissors;
pub mod tic_tac_toe;

pub use count::Count;
pub use narrow::Narrow;
pub use bandit::Bandit;
pub use rock_paper_scissors::RockPaperScissors;
pub use tic_tac_toe::TicTacToe;
