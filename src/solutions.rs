//! Static remedy lookup for rice-leaf disease labels.
//!
//! Keys match the label set emitted by the external classifier. Labels
//! outside the table yield `None` rather than an error, since new model
//! versions may add classes before this table learns about them.

use serde::Serialize;

// ---

/// Advisory entry for one disease label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseSolution {
    pub name: &'static str,
    pub medicine: &'static str,
    pub control: &'static str,
    pub medicine_image: Option<&'static str>,
}

const SOLUTIONS: &[(&str, DiseaseSolution)] = &[
    (
        "bacterial_leaf_blight",
        DiseaseSolution {
            name: "Bacterial Leaf Blight",
            medicine: "Copper-based bactericides (e.g., Copper oxychloride), Streptomycin, \
                       Kasugamycin",
            control: "Use resistant varieties, proper field sanitation",
            medicine_image: Some("Kocide.jpg"),
        },
    ),
    (
        "bacterial_leaf_streak",
        DiseaseSolution {
            name: "Bacterial Leaf Streak",
            medicine: "Copper fungicides (Copper oxychloride), Antibiotics like Streptomycin",
            control: "Seed treatment, resistant varieties",
            medicine_image: Some("Kocide.jpg"),
        },
    ),
    (
        "bacterial_panicle_blight",
        DiseaseSolution {
            name: "Bacterial Panicle Blight",
            medicine: "Copper-based bactericides, Streptomycin",
            control: "Use disease-free seeds, crop rotation",
            medicine_image: Some("Kocide.jpg"),
        },
    ),
    (
        "blast",
        DiseaseSolution {
            name: "Blast (Rice blast fungus, Magnaporthe oryzae)",
            medicine: "Fungicides such as Tricyclazole, Isoprothiolane, Carbendazim",
            control: "Resistant varieties and proper nitrogen management",
            medicine_image: Some("Tricyclazole 75 WP.jpg"),
        },
    ),
    (
        "brown_spot",
        DiseaseSolution {
            name: "Brown Spot",
            medicine: "Fungicides like Mancozeb, Copper oxychloride",
            control: "Balanced fertilization, proper water management",
            medicine_image: Some("Blitox 50 WP.jpg"),
        },
    ),
    (
        "dead_heart",
        DiseaseSolution {
            name: "Dead Heart (Stem borer damage)",
            medicine: "Insecticides such as Carbofuran, Chlorantraniliprole",
            control: "Field sanitation, resistant varieties",
            medicine_image: Some("Furadan 3G.jpg"),
        },
    ),
    (
        "downy_mildew",
        DiseaseSolution {
            name: "Downy Mildew",
            medicine: "Fungicides like Metalaxyl (Ridomil), Copper oxychloride",
            control: "Use resistant varieties, good drainage",
            medicine_image: Some("Ridomil Gold MZ.jpg"),
        },
    ),
    (
        "hispa",
        DiseaseSolution {
            name: "Hispa (Rice hispa beetle)",
            medicine: "Insecticides such as Quinalphos, Chlorpyrifos",
            control: "Early planting, removal of weed hosts",
            medicine_image: Some("Beam 75 WP.jpg"),
        },
    ),
    (
        "normal",
        DiseaseSolution {
            name: "Normal",
            medicine: "No disease; no medicine needed.",
            control: "Maintain good agricultural practices",
            medicine_image: None,
        },
    ),
    (
        "tungro",
        DiseaseSolution {
            name: "Tungro (Rice tungro virus transmitted by leafhoppers)",
            medicine: "No direct medicine; control vectors using insecticides such as \
                       Imidacloprid, Carbofuran",
            control: "Use resistant varieties and proper field management",
            medicine_image: Some("Confidor.jpg"),
        },
    ),
];

/// Look up the advisory entry for a classifier label.
pub fn solution_for(label: &str) -> Option<&'static DiseaseSolution> {
    SOLUTIONS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, solution)| solution)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn known_label_resolves() {
        // ---
        let solution = solution_for("blast").unwrap();
        assert_eq!(solution.name, "Blast (Rice blast fungus, Magnaporthe oryzae)");
        assert_eq!(solution.medicine_image, Some("Tricyclazole 75 WP.jpg"));
    }

    #[test]
    fn healthy_leaf_has_no_medicine_image() {
        // ---
        let solution = solution_for("normal").unwrap();
        assert_eq!(solution.medicine_image, None);
    }

    #[test]
    fn unknown_label_is_absent_not_error() {
        assert!(solution_for("sheath_rot").is_none());
    }
}
