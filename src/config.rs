use serde::{Deserialize, Serialize};

/// Knobs for stereo perception, passed by reference into every entry point.
///
/// Set it up once before a perception pass; sharing one value across threads
/// is fine since nothing here is mutated during a pass.
///
/// # Examples
///
/// ```
/// use stereocrab::StereoConfig;
///
/// let config: StereoConfig =
///     serde_json::from_str(r#"{ "allow_nontetrahedral": false }"#).unwrap();
/// assert!(!config.allow_nontetrahedral);
/// assert_eq!(config.min_ring_size_for_double_bond_stereo, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoConfig {
    /// Perceive square-planar, trigonal-bipyramidal and octahedral centers.
    pub allow_nontetrahedral: bool,
    /// Single classification round, without resolving dependent centers.
    pub use_legacy_perception: bool,
    /// Double bonds in smaller rings never carry cis/trans stereo.
    pub min_ring_size_for_double_bond_stereo: usize,
    /// Cap on the dependent-center fixed point.
    pub max_perception_rounds: usize,
    /// Untagged atoms at or above this atomic number with coordination 5
    /// or 6 are possible trigonal-bipyramidal or octahedral centers.
    pub nontetrahedral_min_atomic_num: u8,
    /// Elements that are possible square-planar centers at coordination 4.
    pub square_planar_elements: Vec<u8>,
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            allow_nontetrahedral: true,
            use_legacy_perception: false,
            min_ring_size_for_double_bond_stereo: 8,
            max_perception_rounds: 64,
            nontetrahedral_min_atomic_num: 15,
            // Rh, Ni, Pd, Ir, Pt, Au
            square_planar_elements: vec![28, 45, 46, 77, 78, 79],
        }
    }
}
