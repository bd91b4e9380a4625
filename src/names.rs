use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Amber", "Brave", "Calm", "Crimson", "Dizzy", "Eager", "Fancy", "Gentle", "Golden", "Happy",
    "Hidden", "Icy", "Jolly", "Lively", "Lucky", "Misty", "Noble", "Quiet", "Rapid", "Silent",
    "Silver", "Sunny", "Swift", "Tiny", "Velvet", "Wild", "Witty", "Zesty",
];

const NOUNS: &[&str] = &[
    "Badger", "Comet", "Dolphin", "Falcon", "Fern", "Fox", "Glacier", "Harbor", "Heron", "Lantern",
    "Lynx", "Maple", "Meadow", "Otter", "Owl", "Pebble", "Phoenix", "Raven", "River", "Sparrow",
    "Tiger", "Tulip", "Walrus", "Willow", "Wolf", "Yak",
];

/// A random human-readable project name such as `Misty Otter`.
pub fn generate_name() -> String {
    generate_name_with(&mut rand::thread_rng())
}

pub fn generate_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Fresh");
    let noun = NOUNS.choose(rng).copied().unwrap_or("Project");
    format!("{} {}", adjective, noun)
}
