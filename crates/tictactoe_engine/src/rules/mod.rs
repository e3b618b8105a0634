//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here mutates
//! state, so the search can call them at every node.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full, outcome};
pub use win::{check_winner, has_won, LINES};
