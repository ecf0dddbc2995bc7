/// Three-stop gradient palette picked from prompt keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub tertiary: [u8; 3],
}

pub const DEFAULT_PALETTE: Palette = Palette {
    name: "default",
    primary: [0x66, 0x7e, 0xea],
    secondary: [0x76, 0x4b, 0xa2],
    tertiary: [0xf0, 0x93, 0xfb],
};

/// Bilingual keyword table, scanned in order; the first matching row wins.
const PALETTE_TABLE: &[(&[&str], Palette)] = &[
    (
        &["blue", "azul"],
        Palette {
            name: "blue",
            primary: [0x1e, 0x3a, 0x8a],
            secondary: [0x3b, 0x82, 0xf6],
            tertiary: [0x93, 0xc5, 0xfd],
        },
    ),
    (
        &["red", "vermelho"],
        Palette {
            name: "red",
            primary: [0x99, 0x1b, 0x1b],
            secondary: [0xdc, 0x26, 0x26],
            tertiary: [0xfc, 0xa5, 0xa5],
        },
    ),
    (
        &["green", "verde"],
        Palette {
            name: "green",
            primary: [0x16, 0x65, 0x34],
            secondary: [0x16, 0xa3, 0x4a],
            tertiary: [0x86, 0xef, 0xac],
        },
    ),
    (
        &["purple", "roxo"],
        Palette {
            name: "purple",
            primary: [0x6b, 0x21, 0xa8],
            secondary: [0xa8, 0x55, 0xf7],
            tertiary: [0xc0, 0x84, 0xfc],
        },
    ),
];

/// Case-insensitive substring scan of the prompt against the fixed
/// keyword table. Falls back to the default palette.
pub fn palette_for_prompt(prompt: &str) -> Palette {
    let lower = prompt.to_lowercase();
    for (keywords, palette) in PALETTE_TABLE {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *palette;
        }
    }
    DEFAULT_PALETTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(palette_for_prompt("a BLUE sky").name, "blue");
        assert_eq!(palette_for_prompt("céu Azul").name, "blue");
    }

    #[test]
    fn test_first_table_row_wins() {
        // "blue" precedes "red" in the table
        assert_eq!(palette_for_prompt("red car under a blue sky").name, "blue");
    }

    #[test]
    fn test_default_palette_when_no_keyword() {
        assert_eq!(palette_for_prompt("a quiet forest at dawn"), DEFAULT_PALETTE);
    }

    #[test]
    fn test_red_prompt_yields_red_triple() {
        let palette = palette_for_prompt("a red dog in the sun");
        assert_eq!(palette.name, "red");
        assert_eq!(palette.secondary, [0xdc, 0x26, 0x26]);
    }
}
