mod history;
mod infoset;
mod player;

pub use self::history::{History, HistoryType};
pub use self::infoset::{ActionIndex, Infoset, InfosetId};
pub use self::player::{InvalidPlayer, Player};
