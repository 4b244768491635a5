//! Built-in research team personas
//!
//! Meeting files refer to these by their snake_case key
//! (e.g. `"principal_investigator"`).

use super::Persona;
use crate::core::error::DomainError;

pub const PRINCIPAL_INVESTIGATOR: &str = "principal_investigator";
pub const GALACTIC_EVOLUTION_EXPERT: &str = "galactic_evolution_expert";
pub const STELLAR_EVOLUTION_EXPERT: &str = "stellar_evolution_expert";
pub const MACHINE_LEARNING_EXPERT: &str = "machine_learning_expert";
pub const SCIENTIFIC_CRITIC: &str = "scientific_critic";
pub const LITERATURE_SEARCH_EXPERT: &str = "literature_search_expert";

/// All preset keys, in display order
pub const PRESET_KEYS: [&str; 6] = [
    PRINCIPAL_INVESTIGATOR,
    GALACTIC_EVOLUTION_EXPERT,
    STELLAR_EVOLUTION_EXPERT,
    MACHINE_LEARNING_EXPERT,
    SCIENTIFIC_CRITIC,
    LITERATURE_SEARCH_EXPERT,
];

/// Look up a preset persona by key
pub fn preset(key: &str) -> Result<Persona, DomainError> {
    let persona = match key {
        PRINCIPAL_INVESTIGATOR => Persona::new(
            "Principal Investigator",
            "galactic archaeology, stellar population analysis",
            "advance our understanding of galactic formation and evolution through chemical and dynamical studies",
            "lead research into the Milky Way's formation history using stellar populations, \
             coordinate chemical abundance analysis, and integrate results with galactic evolution models",
        ),
        GALACTIC_EVOLUTION_EXPERT => Persona::new(
            "Galactic Evolution Expert",
            "chemical evolution modeling and galaxy formation theory",
            "understand the formation and evolution of galactic components through chemical and dynamical signatures",
            "interpret chemical abundance patterns in the context of nucleosynthesis and galaxy formation scenarios, \
             develop galactic evolution models, and connect observations with theoretical predictions",
        ),
        STELLAR_EVOLUTION_EXPERT => Persona::new(
            "Stellar Evolution Expert",
            "stellar physics and spectroscopic analysis",
            "characterize stellar populations and their evolutionary states through spectroscopic and photometric data",
            "analyze stellar spectra to derive fundamental parameters and chemical abundances, \
             interpret stellar populations in the context of evolutionary tracks and isochrones",
        ),
        MACHINE_LEARNING_EXPERT => Persona::new(
            "Machine Learning Expert",
            "astronomical data science and ML applications",
            "develop and apply ML techniques to extract insights from large astronomical datasets",
            "implement machine learning models for stellar parameter estimation, chemical abundance analysis, \
             and pattern recognition in astronomical data, with expertise in handling survey systematics \
             and cross-calibration challenges",
        ),
        SCIENTIFIC_CRITIC => Persona::new(
            "Scientific Critic",
            "critical analysis of galactic archaeology research",
            "ensure that chemical abundance analysis and population assignments are rigorous and well-justified",
            "evaluate methodologies, identify potential biases in survey data, and ensure \
             proper handling of systematic uncertainties",
        ),
        LITERATURE_SEARCH_EXPERT => Persona::new(
            "Literature Search Expert",
            "performing ADS queries, retrieving abstracts, summarizing relevant astrophysical literature",
            "retrieve, parse, and summarize relevant research papers from NASA ADS and gather object data from SIMBAD",
            "enhance the research agenda with the latest published findings and observational details",
        ),
        other => return Err(DomainError::UnknownPersona(other.to_string())),
    };
    Ok(persona)
}

/// Every preset paired with its key
pub fn all() -> Vec<(&'static str, Persona)> {
    PRESET_KEYS
        .iter()
        .filter_map(|key| preset(key).ok().map(|p| (*key, p)))
        .collect()
}
