// src/models/category.rs

//! Forum categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A forum category, identified on the site by a fixed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Introductions,
    PmcDiscussion,
    Workshop,
    Challenges,
    McDiscussion,
    Help,
    Teams,
    Console,
    Portable,
    Projects,
    Skins,
    ResourcePacks,
    Servers,
    Redstone,
    Mods,
    Hubs,
    Artists,
    Youtube,
    Roleplays,
    Games,
    General,
    Gaming,
    Creations,
}

impl Category {
    /// Every category, in breadcrumb order.
    pub const ALL: [Category; 23] = [
        Category::Introductions,
        Category::PmcDiscussion,
        Category::Workshop,
        Category::Challenges,
        Category::McDiscussion,
        Category::Help,
        Category::Teams,
        Category::Console,
        Category::Portable,
        Category::Projects,
        Category::Skins,
        Category::ResourcePacks,
        Category::Servers,
        Category::Redstone,
        Category::Mods,
        Category::Hubs,
        Category::Artists,
        Category::Youtube,
        Category::Roleplays,
        Category::Games,
        Category::General,
        Category::Gaming,
        Category::Creations,
    ];

    /// Site path of the category listing, e.g. `/forums/pmc/introductions/`.
    pub fn path(&self) -> &'static str {
        match self {
            Category::Introductions => "/forums/pmc/introductions/",
            Category::PmcDiscussion => "/forums/pmc/discussion/",
            Category::Workshop => "/forums/pmc/workshop/",
            Category::Challenges => "/forums/pmc/challenges/",
            Category::McDiscussion => "/forums/minecraft/discussion/",
            Category::Help => "/forums/minecraft/help/",
            Category::Teams => "/forums/minecraft/teams/",
            Category::Console => "/forums/minecraft/console/",
            Category::Portable => "/forums/minecraft/portable/",
            Category::Projects => "/forums/minecraft/projects/",
            Category::Skins => "/forums/minecraft/skins/",
            Category::ResourcePacks => "/forums/minecraft/resourcepacks/",
            Category::Servers => "/forums/minecraft/servers/",
            Category::Redstone => "/forums/minecraft/redstone/",
            Category::Mods => "/forums/minecraft/mods/",
            Category::Hubs => "/forums/communities/hubs/",
            Category::Artists => "/forums/communities/artists/",
            Category::Youtube => "/forums/communities/youtube/",
            Category::Roleplays => "/forums/communities/roleplays/",
            Category::Games => "/forums/communities/games/",
            Category::General => "/forums/discussions/general/",
            Category::Gaming => "/forums/discussions/gaming/",
            Category::Creations => "/forums/discussions/creations/",
        }
    }

    /// Breadcrumb label shown on the site.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Introductions => "Forums / PMC / Introductions",
            Category::PmcDiscussion => "Forums / PMC / Discussion",
            Category::Workshop => "Forums / PMC / Workshop",
            Category::Challenges => "Forums / PMC / Challenges",
            Category::McDiscussion => "Forums / Minecraft / Discussion",
            Category::Help => "Forums / Minecraft / Help",
            Category::Teams => "Forums / Minecraft / Teams",
            Category::Console => "Forums / Minecraft / Console",
            Category::Portable => "Forums / Minecraft / Portable",
            Category::Projects => "Forums / Minecraft / Projects",
            Category::Skins => "Forums / Minecraft / Skins",
            Category::ResourcePacks => "Forums / Minecraft / Resourcepacks",
            Category::Servers => "Forums / Minecraft / Servers",
            Category::Redstone => "Forums / Minecraft / Redstone",
            Category::Mods => "Forums / Minecraft / Mods",
            Category::Hubs => "Forums / Communities / Hubs",
            Category::Artists => "Forums / Communities / Artists",
            Category::Youtube => "Forums / Communities / Youtube",
            Category::Roleplays => "Forums / Communities / Roleplays",
            Category::Games => "Forums / Communities / Games",
            Category::General => "Forums / Discussions / General",
            Category::Gaming => "Forums / Discussions / Gaming",
            Category::Creations => "Forums / Discussions / Creations",
        }
    }

    /// Resolve a category from a link path.
    ///
    /// Accepts the path with or without its trailing slash, and absolute URLs
    /// on any host. Unknown paths resolve to `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match url::Url::parse(path) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => path.split(['?', '#']).next().unwrap_or_default().to_string(),
        };
        let trimmed = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|c| c.path().trim_end_matches('/') == trimmed)
    }

    /// Short machine name, e.g. `resource_packs`.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Introductions => "introductions",
            Category::PmcDiscussion => "pmc_discussion",
            Category::Workshop => "workshop",
            Category::Challenges => "challenges",
            Category::McDiscussion => "mc_discussion",
            Category::Help => "help",
            Category::Teams => "teams",
            Category::Console => "console",
            Category::Portable => "portable",
            Category::Projects => "projects",
            Category::Skins => "skins",
            Category::ResourcePacks => "resource_packs",
            Category::Servers => "servers",
            Category::Redstone => "redstone",
            Category::Mods => "mods",
            Category::Hubs => "hubs",
            Category::Artists => "artists",
            Category::Youtube => "youtube",
            Category::Roleplays => "roleplays",
            Category::Games => "games",
            Category::General => "general",
            Category::Gaming => "gaming",
            Category::Creations => "creations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .or_else(|| Self::from_path(s))
            .ok_or_else(|| AppError::invalid_argument(format!("unknown forum category '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip_for_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_path(category.path()), Some(category));
        }
    }

    #[test]
    fn test_from_path_without_trailing_slash() {
        assert_eq!(
            Category::from_path("/forums/discussions/creations"),
            Some(Category::Creations)
        );
    }

    #[test]
    fn test_from_absolute_url() {
        assert_eq!(
            Category::from_path("https://www.planetminecraft.com/forums/pmc/introductions/"),
            Some(Category::Introductions)
        );
    }

    #[test]
    fn test_unknown_path_is_absent() {
        assert_eq!(Category::from_path("/forums/nowhere/"), None);
        assert_eq!(Category::from_path(""), None);
    }

    #[test]
    fn test_from_str_by_name() {
        assert_eq!(
            "resource-packs".parse::<Category>().ok(),
            Some(Category::ResourcePacks)
        );
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Category::ALL.len());
    }
}
