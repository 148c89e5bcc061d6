mod all;
mod footer;
mod home;
mod log;
mod modal;
mod task_list;

use self::log::log;
use super::*;
use footer::footer;
use home::home;
use modal::modal;

pub use all::all as render;
