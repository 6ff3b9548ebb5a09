use super::{ClimateClass, FlowerProfile};

pub(super) fn flower_profiles() -> Vec<FlowerProfile> {
    vec![
        FlowerProfile::new("rose", "Rosa", ClimateClass::Temperate, "May to September"),
        FlowerProfile::new(
            "rhododendron",
            "Rhododendron arboreum",
            ClimateClass::Cold,
            "March to May",
        ),
        FlowerProfile::new(
            "sunflower",
            "Helianthus annuus",
            ClimateClass::Universal,
            "June to September",
        ),
        FlowerProfile::new("tulip", "Tulipa", ClimateClass::Cold, "March to May"),
        FlowerProfile::new(
            "cherry blossom",
            "Prunus serrulata",
            ClimateClass::Cold,
            "March to April",
        ),
        FlowerProfile::new(
            "lotus",
            "Nelumbo nucifera",
            ClimateClass::Universal,
            "June to August",
        ),
        FlowerProfile::new(
            "jasmine",
            "Jasminum",
            ClimateClass::Tropical,
            "June to September",
        ),
        FlowerProfile::new(
            "marigold",
            "Tagetes",
            ClimateClass::Universal,
            "July to October",
        ),
        FlowerProfile::new(
            "lavender",
            "Lavandula",
            ClimateClass::Temperate,
            "June to August",
        ),
        FlowerProfile::new(
            "orchid",
            "Orchidaceae",
            ClimateClass::Tropical,
            "Year-round (varies)",
        ),
    ]
}

pub(super) const TROPICAL_KEYWORDS: &[&str] = &[
    "kerala",
    "tamil nadu",
    "goa",
    "chennai",
    "mumbai",
    "kolkata",
    "andaman",
    "sri lanka",
    "bangladesh",
    "thailand",
    "vietnam",
    "cambodia",
    "malaysia",
    "singapore",
    "indonesia",
    "philippines",
    "amazon",
    "brazil",
    "colombia",
    "costa rica",
    "panama",
    "caribbean",
    "hawaii",
    "congo",
    "nigeria",
    "ghana",
    "kenya",
    "tropical",
    "equator",
];

pub(super) const COLD_KEYWORDS: &[&str] = &[
    "kashmir",
    "ladakh",
    "himalaya",
    "shimla",
    "tibet",
    "nepal",
    "alps",
    "switzerland",
    "netherlands",
    "scandinavia",
    "norway",
    "sweden",
    "finland",
    "iceland",
    "scotland",
    "siberia",
    "mongolia",
    "alaska",
    "canada",
    "greenland",
    "patagonia",
    "andes",
    "hokkaido",
];
