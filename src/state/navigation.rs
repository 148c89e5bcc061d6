//! Navigation shell types.
//!
//! Screens form a closed set. The shell registers the screens it can host and
//! refuses routes to anything else, so a dangling destination surfaces as an
//! error instead of a silent no-op.

use super::error::StateError;
use std::collections::HashSet;
use std::fmt;

/// Specifying the different screens.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ScreenId {
    Home,
    EditTask,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenId::Home => write!(f, "Home"),
            ScreenId::EditTask => write!(f, "EditTask"),
        }
    }
}

/// A screen plus the parameters it was opened with.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Route {
    pub screen: ScreenId,
    pub task_id: Option<u64>,
}

impl Route {
    pub fn home() -> Self {
        Route {
            screen: ScreenId::Home,
            task_id: None,
        }
    }

    pub fn edit_task(task_id: u64) -> Self {
        Route {
            screen: ScreenId::EditTask,
            task_id: Some(task_id),
        }
    }
}

/// Stack navigator over registered screens.
///
#[derive(Debug)]
pub struct Router {
    registered: HashSet<ScreenId>,
    root: Route,
    stack: Vec<Route>,
}

impl Router {
    /// Return a router whose only registered screen is the given root.
    ///
    pub fn new(root: ScreenId) -> Self {
        let mut registered = HashSet::new();
        registered.insert(root);
        Router {
            registered,
            root: Route {
                screen: root,
                task_id: None,
            },
            stack: vec![],
        }
    }

    /// Register an additional screen.
    ///
    #[allow(dead_code)]
    pub fn register(&mut self, screen: ScreenId) -> &mut Self {
        self.registered.insert(screen);
        self
    }

    pub fn is_registered(&self, screen: ScreenId) -> bool {
        self.registered.contains(&screen)
    }

    /// Push the route if its screen is registered.
    ///
    pub fn navigate(&mut self, route: Route) -> Result<(), StateError> {
        if !self.is_registered(route.screen) {
            return Err(StateError::UnregisteredScreen {
                screen: route.screen,
            });
        }
        self.stack.push(route);
        Ok(())
    }

    /// Pop the current route. The root is never popped.
    ///
    pub fn back(&mut self) -> Option<Route> {
        self.stack.pop()
    }

    pub fn current(&self) -> &Route {
        self.stack.last().unwrap_or(&self.root)
    }

    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }
}
