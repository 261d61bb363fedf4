use super::dict::AtomDict;
use nalgebra::Point3;

/// An atom of a [`Model`](super::structure::Model).
///
/// Residue and chain membership are held by the containers that own the
/// atom's id, not by the atom itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from columns 7-11, used by `CONECT` records.
    pub serial: Option<i64>,
    /// The atom name (e.g. "CA", "HCG2").
    pub name: Option<String>,
    pub alt_loc: Option<char>,
    /// Cartesian coordinates in Angstroms, present only when all three are known.
    pub position: Option<Point3<f64>>,
    pub occupancy: f64,
    pub temp_factor: Option<f64>,
    pub element: Option<String>,
    /// Formal charge in elementary charge units.
    pub charge: i32,
}

impl Atom {
    /// Creates a fully occupied, neutral atom.
    pub fn new(serial: i64, name: &str, position: Point3<f64>) -> Self {
        Self {
            serial: Some(serial),
            name: Some(name.to_string()),
            alt_loc: None,
            position: Some(position),
            occupancy: 1.0,
            temp_factor: None,
            element: None,
            charge: 0,
        }
    }

    /// Euclidean distance to `other`, or `None` if either atom has no position.
    pub fn distance_to(&self, other: &Atom) -> Option<f64> {
        Some(nalgebra::distance(&self.position?, &other.position?))
    }

    pub(crate) fn from_dict(dict: &AtomDict) -> Self {
        let position = match (dict.x, dict.y, dict.z) {
            (Some(x), Some(y), Some(z)) => Some(Point3::new(x, y, z)),
            _ => None,
        };
        Self {
            serial: dict.atom_id,
            name: dict.atom_name.clone(),
            alt_loc: dict.alt_loc,
            position,
            occupancy: dict.occupancy,
            temp_factor: dict.temp_factor,
            element: dict.element.clone(),
            charge: dict.charge,
        }
    }

    /// Builds the atom dictionary, taking the residue fields from the owner.
    pub(crate) fn to_dict(&self, owner: ResidueFields<'_>) -> AtomDict {
        AtomDict {
            atom_id: self.serial,
            atom_name: self.name.clone(),
            alt_loc: self.alt_loc,
            residue_name: owner.name.map(str::to_string),
            chain_id: owner.chain_id,
            residue_id: owner.residue_id,
            insert_code: owner.insert_code,
            x: self.position.map(|p| p.x),
            y: self.position.map(|p| p.y),
            z: self.position.map(|p| p.z),
            occupancy: self.occupancy,
            temp_factor: self.temp_factor,
            element: self.element.clone(),
            charge: self.charge,
        }
    }
}

/// The per-atom residue columns contributed by a residue or molecule.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ResidueFields<'a> {
    pub name: Option<&'a str>,
    pub chain_id: Option<char>,
    pub residue_id: Option<i64>,
    pub insert_code: Option<char>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Atom::new(1, "N", Point3::new(0.0, 0.0, 0.0));
        let b = Atom::new(2, "CA", Point3::new(3.0, 4.0, 0.0));
        assert!((a.distance_to(&b).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(b.distance_to(&b), Some(0.0));
    }

    #[test]
    fn distance_needs_both_positions() {
        let a = Atom::new(1, "N", Point3::origin());
        let mut b = a.clone();
        b.position = None;
        assert_eq!(a.distance_to(&b), None);
    }

    #[test]
    fn partial_coordinates_leave_the_position_unset() {
        let dict = AtomDict {
            x: Some(1.0),
            y: Some(2.0),
            ..Default::default()
        };
        assert_eq!(Atom::from_dict(&dict).position, None);
    }

    #[test]
    fn dict_conversion_keeps_atom_fields_and_takes_owner_fields() {
        let dict = AtomDict {
            atom_id: Some(7),
            atom_name: Some("ZN".into()),
            residue_name: Some("ZN".into()),
            chain_id: Some('B'),
            residue_id: Some(101),
            x: Some(1.0),
            y: Some(2.0),
            z: Some(3.0),
            occupancy: 0.5,
            element: Some("ZN".into()),
            charge: 2,
            ..Default::default()
        };
        let atom = Atom::from_dict(&dict);
        assert_eq!(atom.position, Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(atom.charge, 2);

        let owner = ResidueFields {
            name: Some("ZN"),
            chain_id: Some('B'),
            residue_id: Some(101),
            insert_code: None,
        };
        assert_eq!(atom.to_dict(owner), dict);
    }
}
