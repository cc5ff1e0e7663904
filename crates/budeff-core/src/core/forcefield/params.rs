use phf::{Map, phf_map};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Residue class holding residue-independent fallback parameters.
pub const WILDCARD_RESIDUE: &str = "WLD";
/// Metadata entry that is never resolved against.
pub const METADATA_KEY: &str = "KEY";
/// Number of slots in one atom record: the type label followed by seven numbers.
pub const RECORD_ARITY: usize = 8;

const CHARGE_EPSILON: f64 = 1e-6;

/// Physicochemical class of a force field atom type, used to gate desolvation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    NonPolar,
    Polar,
    Charged,
}

#[rustfmt::skip]
static EXACT_TYPE_POLARITY: Map<&'static str, Polarity> = phf_map! {
    // --- Metal and monatomic ions ---
    // Labels starting with 'C' name carbons (CA, CD, CO, ...) and are left to the
    // leading-letter rule; a charged metal among them is caught by its charge.
    "ZN" => Polarity::Charged, "FE" => Polarity::Charged, "MG" => Polarity::Charged,
    "MN" => Polarity::Charged, "NI" => Polarity::Charged, "NA" => Polarity::Charged,
    "K"  => Polarity::Charged,

    // --- Halogens spelled with two letters ---
    "CL" => Polarity::NonPolar, "BR" => Polarity::NonPolar,
};

impl Polarity {
    /// Classifies a force field type label, taking the record's charge into account.
    pub fn classify(ff_type: &str, charge: f64) -> Self {
        let label = ff_type.trim().to_ascii_uppercase();
        let by_type = EXACT_TYPE_POLARITY
            .get(label.as_str())
            .copied()
            .unwrap_or_else(|| match label.chars().next() {
                Some('C' | 'S' | 'F' | 'I') => Polarity::NonPolar,
                _ => Polarity::Polar,
            });

        if by_type == Polarity::NonPolar && charge.abs() >= CHARGE_EPSILON {
            Polarity::Charged
        } else {
            by_type
        }
    }
}

/// Per-atom force field parameters, resolved once when the table is built.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Force field atom type label (e.g., "C", "N", "O").
    pub ff_type: String,
    /// Contact radius in Angstroms.
    pub radius: f64,
    /// Radius of the hard core; overlap inside the combined core is strongly repulsive.
    pub core_radius: f64,
    /// Depth of the steric attraction well.
    pub well_depth: f64,
    /// Surface separation up to which two non-polar atoms gain desolvation energy.
    pub npnp_cutoff: f64,
    /// Partial or formal charge in elementary charge units.
    pub charge: f64,
    /// Strength of the non-polar desolvation contribution.
    pub solvation_coefficient: f64,
    /// Carried through from the parameter file; not used by the energy model.
    pub reserved: f64,
    /// Derived from `ff_type` and `charge`.
    pub polarity: Polarity,
}

impl AtomRecord {
    fn from_values(residue: &str, atom: &str, values: &[Value]) -> Result<Self, ParameterFormatError> {
        if values.len() != RECORD_ARITY {
            return Err(ParameterFormatError::WrongArity {
                residue: residue.to_string(),
                atom: atom.to_string(),
                found: values.len(),
            });
        }

        let ff_type = values[0]
            .as_str()
            .ok_or_else(|| ParameterFormatError::NonStringType {
                residue: residue.to_string(),
                atom: atom.to_string(),
            })?
            .to_string();

        let mut numbers = [0.0; RECORD_ARITY - 1];
        for (slot, value) in values[1..].iter().enumerate() {
            numbers[slot] = value
                .as_f64()
                .ok_or_else(|| ParameterFormatError::NonNumericField {
                    residue: residue.to_string(),
                    atom: atom.to_string(),
                    index: slot + 1,
                })?;
        }
        let [radius, core_radius, well_depth, npnp_cutoff, charge, solvation_coefficient, reserved] =
            numbers;

        Ok(Self {
            polarity: Polarity::classify(&ff_type, charge),
            ff_type,
            radius,
            core_radius,
            well_depth,
            npnp_cutoff,
            charge,
            solvation_coefficient,
            reserved,
        })
    }
}

/// Compact handle to one entry of a [`ForceFieldTable`].
///
/// This is the force field identifier produced by the assignment step; it is only
/// valid for the table that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamKey(pub u32);

impl ParamKey {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParameterFormatError {
    #[error("Residue class '{residue}' must map atom names to parameter records")]
    NotAMapping { residue: String },
    #[error("Parameters for atom '{atom}' of residue class '{residue}' must be a list")]
    NotARecord { residue: String, atom: String },
    #[error("Record for atom '{atom}' of residue class '{residue}' has {found} fields, expected 8")]
    WrongArity {
        residue: String,
        atom: String,
        found: usize,
    },
    #[error("Record for atom '{atom}' of residue class '{residue}' must start with a type label")]
    NonStringType { residue: String, atom: String },
    #[error("Field {index} of atom '{atom}' in residue class '{residue}' is not numeric")]
    NonNumericField {
        residue: String,
        atom: String,
        index: usize,
    },
    #[error("Atom '{atom}' of residue class '{residue}' is defined more than once (keys are case-insensitive)")]
    DuplicateEntry { residue: String, atom: String },
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Badly formatted force field parameters in '{path}': {source}")]
    Format {
        path: String,
        source: ParameterFormatError,
    },
}

/// Why an atom could not be resolved against a table.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolutionError {
    #[error("{atom} atom is not parameterised in the selected force field for {residue} residues")]
    AtomNotParameterized { residue: String, atom: String },
    #[error("{atom} ({residue}) atom is not parameterised in the selected residue force field")]
    ResidueNotParameterized { residue: String, atom: String },
}

/// Raw force field resource: residue class to atom name to 8-field record.
pub type RawForceField = BTreeMap<String, Value>;

/// Immutable, interned lookup table of per-atom force field parameters.
///
/// The table is frozen at construction. Changing parameters means building a new
/// table; overriding the distance cutoff returns a new value as well.
#[derive(Debug, Clone)]
pub struct ForceFieldTable {
    name: String,
    records: Vec<AtomRecord>,
    names: Vec<(String, String)>,
    index: HashMap<String, HashMap<String, ParamKey>>,
    derived_cutoff: f64,
    explicit_cutoff: Option<f64>,
}

impl ForceFieldTable {
    pub fn build(name: &str, parameters: &RawForceField) -> Result<Self, ParameterFormatError> {
        let mut records = Vec::new();
        let mut names = Vec::new();
        let mut index: HashMap<String, HashMap<String, ParamKey>> = HashMap::new();

        for (residue, atoms) in parameters {
            if residue == METADATA_KEY {
                continue;
            }
            let atoms = atoms
                .as_object()
                .ok_or_else(|| ParameterFormatError::NotAMapping {
                    residue: residue.clone(),
                })?;

            let residue_key = residue.to_ascii_uppercase();
            for (atom, values) in atoms {
                let values = values
                    .as_array()
                    .ok_or_else(|| ParameterFormatError::NotARecord {
                        residue: residue.clone(),
                        atom: atom.clone(),
                    })?;
                let record = AtomRecord::from_values(residue, atom, values)?;

                let atom_key = atom.to_ascii_uppercase();
                let residue_entries = index.entry(residue_key.clone()).or_default();
                if residue_entries.contains_key(&atom_key) {
                    return Err(ParameterFormatError::DuplicateEntry {
                        residue: residue.clone(),
                        atom: atom.clone(),
                    });
                }
                let key = ParamKey(records.len() as u32);
                residue_entries.insert(atom_key.clone(), key);
                records.push(record);
                names.push((residue_key.clone(), atom_key));
            }
        }

        let (max_radius, max_npnp) = max_radius_and_npnp(&records);
        Ok(Self {
            name: name.to_string(),
            records,
            names,
            index,
            derived_cutoff: max_radius * 2.0 + max_npnp,
            explicit_cutoff: None,
        })
    }

    pub fn from_json_str(name: &str, content: &str) -> Result<Self, ParamLoadError> {
        let raw: RawForceField = serde_json::from_str(content).map_err(|e| ParamLoadError::Json {
            path: name.to_string(),
            source: e,
        })?;
        Self::build(name, &raw).map_err(|e| ParamLoadError::Format {
            path: name.to_string(),
            source: e,
        })
    }

    /// Loads a table from a JSON file, naming it after the file stem.
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawForceField = serde_json::from_str(&content).map_err(|e| ParamLoadError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::build(&table_id_for(path), &raw).map_err(|e| ParamLoadError::Format {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Returns a copy of this table whose distance cutoff is fixed to `cutoff`.
    pub fn with_distance_cutoff(mut self, cutoff: f64) -> Self {
        self.explicit_cutoff = Some(cutoff);
        self
    }

    /// Distance beyond which no pair interacts.
    ///
    /// `2 * max(radius) + max(npnp_cutoff)` unless an explicit cutoff has been set.
    pub fn distance_cutoff(&self) -> f64 {
        self.explicit_cutoff.unwrap_or(self.derived_cutoff)
    }

    pub fn max_radius_and_npnp(&self) -> (f64, f64) {
        max_radius_and_npnp(&self.records)
    }

    /// Resolves `(residue_class, atom_name)`, falling back to the wildcard class.
    pub fn lookup(&self, residue_class: &str, atom_name: &str) -> Result<ParamKey, ResolutionError> {
        let residue = residue_class.trim().to_ascii_uppercase();
        let atom = atom_name.trim().to_ascii_uppercase();

        let residue_entries = self.index.get(&residue);
        if let Some(&key) = residue_entries.and_then(|atoms| atoms.get(&atom)) {
            return Ok(key);
        }
        if let Some(&key) = self
            .index
            .get(WILDCARD_RESIDUE)
            .and_then(|atoms| atoms.get(&atom))
        {
            return Ok(key);
        }

        Err(match residue_entries {
            Some(_) => ResolutionError::AtomNotParameterized {
                residue: residue_class.to_string(),
                atom: atom_name.to_string(),
            },
            None => ResolutionError::ResidueNotParameterized {
                residue: residue_class.to_string(),
                atom: atom_name.to_string(),
            },
        })
    }

    /// Returns the record behind `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was issued by a different table.
    #[inline]
    pub fn record(&self, key: ParamKey) -> &AtomRecord {
        &self.records[key.index()]
    }

    #[inline]
    pub fn get(&self, key: ParamKey) -> Option<&AtomRecord> {
        self.records.get(key.index())
    }

    /// The `(residue_class, atom_name)` an entry was stored under (upper-cased).
    pub fn key_names(&self, key: ParamKey) -> Option<(&str, &str)> {
        self.names
            .get(key.index())
            .map(|(residue, atom)| (residue.as_str(), atom.as_str()))
    }

    pub fn contains_residue_class(&self, residue_class: &str) -> bool {
        self.index
            .contains_key(&residue_class.trim().to_ascii_uppercase())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn max_radius_and_npnp(records: &[AtomRecord]) -> (f64, f64) {
    records.iter().fold((0.0_f64, 0.0_f64), |(rad, npnp), record| {
        (rad.max(record.radius), npnp.max(record.npnp_cutoff))
    })
}

/// Identifier of a table loaded from `path`: the file name up to its first `.`.
pub(crate) fn table_id_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}
