//! Dependency ecosystems the update bot opens pull requests for
//!
//! Dependabot names its branches `dependabot/<ecosystem>/<dependency>-<version>`,
//! so the ecosystem of a pull request is recovered from its head branch.

use std::fmt;
use std::str::FromStr;

/// A recognized dependency ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ecosystem {
    /// npm, Yarn and pnpm
    NpmAndYarn,
    /// GitHub Actions workflows
    GithubActions,
    /// Go modules
    GoModules,
    /// Git submodules
    GitSubmodules,
    /// .NET SDK
    DotnetSdk,
    /// Dev containers
    Devcontainers,
    /// Terraform
    Terraform,
    /// Composer (PHP)
    Composer,
    /// Bundler (Ruby)
    Bundler,
    /// Gradle
    Gradle,
    /// Maven
    Maven,
    /// `NuGet`
    Nuget,
    /// Cargo (Rust)
    Cargo,
    /// Docker
    Docker,
    /// Swift Package Manager
    Swift,
    /// pip, pipenv and poetry
    Pip,
    /// pub (Dart/Flutter)
    Pub,
    /// Elm
    Elm,
    /// Hex (Elixir)
    Hex,
}

impl Ecosystem {
    /// Catalog in matching order
    pub const ALL: [Self; 19] = [
        Self::NpmAndYarn,
        Self::GithubActions,
        Self::GoModules,
        Self::GitSubmodules,
        Self::DotnetSdk,
        Self::Devcontainers,
        Self::Terraform,
        Self::Composer,
        Self::Bundler,
        Self::Gradle,
        Self::Maven,
        Self::Nuget,
        Self::Cargo,
        Self::Docker,
        Self::Swift,
        Self::Pip,
        Self::Pub,
        Self::Elm,
        Self::Hex,
    ];

    /// Identifier used in branch names and as the `.steward.yml` key
    pub const fn id(self) -> &'static str {
        match self {
            Self::NpmAndYarn => "npm_and_yarn",
            Self::GithubActions => "github_actions",
            Self::GoModules => "go_modules",
            Self::GitSubmodules => "git_submodules",
            Self::DotnetSdk => "dotnet_sdk",
            Self::Devcontainers => "devcontainers",
            Self::Terraform => "terraform",
            Self::Composer => "composer",
            Self::Bundler => "bundler",
            Self::Gradle => "gradle",
            Self::Maven => "maven",
            Self::Nuget => "nuget",
            Self::Cargo => "cargo",
            Self::Docker => "docker",
            Self::Swift => "swift",
            Self::Pip => "pip",
            Self::Pub => "pub",
            Self::Elm => "elm",
            Self::Hex => "hex",
        }
    }

    /// First catalog entry whose identifier occurs in `branch`
    ///
    /// Branches that contain several identifiers resolve to whichever comes
    /// first in [`Ecosystem::ALL`].
    pub fn classify(branch: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|eco| branch.contains(eco.id()))
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|eco| eco.id() == s)
            .ok_or_else(|| format!("unknown ecosystem '{s}'"))
    }
}
