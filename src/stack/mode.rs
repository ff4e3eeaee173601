crate::define_id_enum! {
    /// What the user wants to do with the project
    RunMode {
        Dev => "dev" : "development" | "development",
        Build => "build" : "build",
        Prod => "prod" : "production" | "production",
    }
}

impl RunMode {
    /// Manifest script names tried for this mode, highest priority first.
    ///
    /// The first entry is the primary candidate: when present it wins without
    /// asking.
    pub fn script_candidates(&self) -> &'static [&'static str] {
        match self {
            RunMode::Dev => &["dev", "start", "serve", "watch", "server"],
            RunMode::Build => &["build", "compile", "package", "dist"],
            RunMode::Prod => &["start", "run", "serve"],
        }
    }

    /// Script a monorepo runner is asked for when the manifest has no match
    pub fn delegate_default(&self) -> &'static str {
        match self {
            RunMode::Dev => "dev",
            RunMode::Build => "build",
            RunMode::Prod => "start",
        }
    }
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Dev
    }
}
