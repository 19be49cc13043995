use super::Configuration;
use indexmap::IndexMap;
use jarslim_api::DependencyFilter;

/// Named preset of include/exclude filters.
#[derive(Debug, Clone)]
pub struct SlimmingProfile {
    name: String,
    includes: Vec<DependencyFilter>,
    excludes: Vec<DependencyFilter>,
}

impl SlimmingProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }

    pub fn include(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.includes
            .push(DependencyFilter::new().group(group_id).artifact(artifact_id));
        self
    }

    pub fn exclude(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.excludes
            .push(DependencyFilter::new().group(group_id).artifact(artifact_id));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn includes(&self) -> &[DependencyFilter] {
        &self.includes
    }

    pub fn excludes(&self) -> &[DependencyFilter] {
        &self.excludes
    }

    /// Appends the profile's filters after the configuration's own. Nothing is replaced.
    pub fn apply_to(&self, mut config: Configuration) -> Configuration {
        config.includes.extend(self.includes.iter().cloned());
        config.excludes.extend(self.excludes.iter().cloned());
        config
    }
}

/// Catalog of profiles, keyed by lowercase name. Built once and passed by reference.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: IndexMap<String, SlimmingProfile>,
}

impl ProfileRegistry {
    pub fn empty() -> Self {
        Self {
            profiles: IndexMap::new(),
        }
    }

    /// The presets shipped with jarslim.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.register(
            SlimmingProfile::new("ollama-only")
                .include("dev.langchain4j", "langchain4j-core")
                .include("dev.langchain4j", "langchain4j-ollama")
                .exclude("com.microsoft.*", "*")
                .exclude("com.amazon.*", "*")
                .exclude("org.apache.hadoop.*", "*")
                .exclude("org.apache.tika.*", "*"),
        );

        registry.register(
            SlimmingProfile::new("openai-only")
                .include("dev.langchain4j", "langchain4j-core")
                .include("dev.langchain4j", "langchain4j-open-ai")
                .exclude("dev.langchain4j", "langchain4j-ollama")
                .exclude("com.microsoft.*", "*")
                .exclude("com.amazon.*", "*")
                .exclude("org.apache.hadoop.*", "*"),
        );

        // Removes most heavy dependencies
        registry.register(
            SlimmingProfile::new("minimal")
                .exclude("org.apache.hadoop.*", "*")
                .exclude("org.apache.tika.*", "*")
                .exclude("com.microsoft.*", "*")
                .exclude("com.amazon.*", "*")
                .exclude("org.apache.spark.*", "*"),
        );

        registry
    }

    pub fn register(&mut self, profile: SlimmingProfile) {
        self.profiles
            .insert(profile.name().to_lowercase(), profile);
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&SlimmingProfile> {
        self.profiles.get(&name.trim().to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlimmingProfile> {
        self.profiles.values()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
