//! Why an entity left the world

/// Reason an entity was removed from the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestroyCause {
    /// Its lifetime ran out during a tick
    Expired,
    /// It hit something that destroys it
    Collision,
    /// It was picked up by the player
    Collected,
    /// It left the playable area
    OffScreen,
    /// Its scene or session was torn down
    Teardown,
}

impl DestroyCause {
    /// Whether the removal came from the game rules rather than a teardown
    pub fn is_gameplay(self) -> bool {
        !matches!(self, Self::Teardown)
    }
}
