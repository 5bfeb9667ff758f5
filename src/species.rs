//! The species roster used for matchups and the marathon backdrop.

use crate::palette::NamedColor;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Species {
    pub id: &'static str,
    pub name: &'static str,
    pub glyph: char,
    pub color: &'static str,
}

impl Species {
    pub fn named_color(&self) -> NamedColor {
        NamedColor::from_name(self.color)
    }
}

pub static SPECIES_POOL: [Species; 15] = [
    Species { id: "chicken", name: "Chicken", glyph: 'C', color: "yellow" },
    Species { id: "baboon", name: "Baboon", glyph: 'B', color: "brown" },
    Species { id: "cat", name: "Cat", glyph: 'c', color: "lgray" },
    Species { id: "dog", name: "Dog", glyph: 'd', color: "brown" },
    Species { id: "rat", name: "Rat", glyph: 'r', color: "dgray" },
    Species { id: "snake", name: "Snake", glyph: 's', color: "lgreen" },
    Species { id: "spider", name: "Spider", glyph: 'x', color: "lgray" },
    Species { id: "wolf", name: "Wolf", glyph: 'w', color: "lgray" },
    Species { id: "bear", name: "Bear", glyph: 'U', color: "brown" },
    Species { id: "lion", name: "Lion", glyph: 'L', color: "yellow" },
    Species { id: "tiger", name: "Tiger", glyph: 'T', color: "orange" },
    Species { id: "dragon", name: "Dragon", glyph: 'D', color: "lred" },
    Species { id: "demon", name: "Demon", glyph: '&', color: "lred" },
    Species { id: "ant", name: "Ant", glyph: 'a', color: "brown" },
    Species { id: "goose", name: "Goose", glyph: 'G', color: "white" },
];

pub fn find(id: &str) -> Option<&'static Species> {
    SPECIES_POOL.iter().find(|s| s.id == id)
}

/// Display name for a species id. Unknown ids are title-cased with
/// underscores turned into spaces.
pub fn display_name(id: &str) -> String {
    if let Some(species) = find(id) {
        return species.name.to_string();
    }
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn random<R: Rng>(rng: &mut R) -> &'static Species {
    // SPECIES_POOL is non-empty
    &SPECIES_POOL[rng.gen_range(0..SPECIES_POOL.len())]
}

/// Two different species.
pub fn random_pair<R: Rng>(rng: &mut R) -> (&'static Species, &'static Species) {
    let picks: Vec<&'static Species> = SPECIES_POOL.choose_multiple(rng, 2).collect();
    match picks.as_slice() {
        [a, b] => (*a, *b),
        _ => (&SPECIES_POOL[0], &SPECIES_POOL[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in SPECIES_POOL.iter().enumerate() {
            for b in &SPECIES_POOL[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("goose"), "Goose");
        assert_eq!(display_name("giant_cave_spider"), "Giant Cave Spider");
    }

    #[test]
    fn test_random_pair_is_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let (a, b) = random_pair(&mut rng);
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_colors_resolve() {
        assert_eq!(find("tiger").map(|s| s.named_color()), Some(NamedColor::Orange));
        assert_eq!(find("rat").map(|s| s.named_color()), Some(NamedColor::DarkGray));
    }
}
