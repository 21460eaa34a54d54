//! Ambient sound catalogue.

/// A looping background sound the user can pick.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmbientSound {
    /// Stable identifier.
    pub id: String,
    /// Name shown in the sound list.
    pub name: String,
    /// File stem of the sound resource inside the sounds directory.
    pub resource_name: String,
}

impl AmbientSound {
    /// Creates a new sound entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resource_name: resource_name.into(),
        }
    }
}

/// Returns the fixed set of sounds shipped with BackTune.
#[must_use]
pub fn available_sounds() -> Vec<AmbientSound> {
    vec![
        AmbientSound::new("rain", "Rain", "rain"),
        AmbientSound::new("waves", "Waves", "waves"),
        AmbientSound::new("forest", "Forest", "forest"),
    ]
}

#[cfg(test)]
mod tests {
    use crate::model::sound::available_sounds;

    #[test]
    fn test_available_sounds_are_fixed() {
        let sounds = available_sounds();
        let ids: Vec<&str> = sounds.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["rain", "waves", "forest"]);
        assert!(sounds.iter().all(|s| s.id == s.resource_name));
        assert_eq!(sounds[1].name, "Waves");
    }
}
