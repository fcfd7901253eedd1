use std::fmt;

/// Coordinator lifecycle. Each phase has exactly one successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Seeding,
    Spawning,
    Running,
    ShuttingDown,
    Terminated,
}

impl Phase {
    /// The phase that follows this one, `None` once terminated.
    pub fn next(self) -> Option<Phase> {
        match self {
            Self::Seeding => Some(Self::Spawning),
            Self::Spawning => Some(Self::Running),
            Self::Running => Some(Self::ShuttingDown),
            Self::ShuttingDown => Some(Self::Terminated),
            Self::Terminated => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Seeding => "seeding",
            Self::Spawning => "spawning",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_in_order() {
        let mut seen = vec![Phase::Seeding];
        while let Some(next) = seen.last().unwrap().next() {
            seen.push(next);
        }
        assert_eq!(
            seen,
            vec![
                Phase::Seeding,
                Phase::Spawning,
                Phase::Running,
                Phase::ShuttingDown,
                Phase::Terminated
            ]
        );
    }

    #[test]
    fn display() {
        assert_eq!(Phase::ShuttingDown.to_string(), "shutting-down");
    }
}
