use strum_macros::{AsRefStr, Display, EnumIter, FromRepr};

/// Side of the arm.
#[derive(FromRepr, Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Side {
    Left = 1,
    Right = 2,
}

impl Side {
    /// Sign applied to the lateral component in the shoulder axis system
    /// (SAS). The lateral axis points from the left shoulder to the right
    /// shoulder, so it is reversed for the left arm to point away from the
    /// body.
    ///
    /// # Returns
    /// -1.0 for the left arm and 1.0 for the right arm.
    pub fn lateral_sign(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Anatomical landmarks in the global axis system. The names are used as the
/// keys in the scenario file.
#[derive(FromRepr, Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Landmark {
    LeftHand = 0,
    LeftWrist = 1,
    LeftElbow = 2,
    LeftShoulder = 3,
    RightHand = 4,
    RightWrist = 5,
    RightElbow = 6,
    RightShoulder = 7,
    #[strum(serialize = "c7t1")]
    C7T1 = 8,
    #[strum(serialize = "l5s1")]
    L5S1 = 9,
}

impl Landmark {
    /// Get the landmarks of the arm.
    ///
    /// # Arguments
    /// * `side` - Side of the arm.
    ///
    /// # Returns
    /// Hand, wrist, elbow, and shoulder in order.
    pub fn arm(side: Side) -> [Landmark; 4] {
        match side {
            Side::Left => [
                Landmark::LeftHand,
                Landmark::LeftWrist,
                Landmark::LeftElbow,
                Landmark::LeftShoulder,
            ],
            Side::Right => [
                Landmark::RightHand,
                Landmark::RightWrist,
                Landmark::RightElbow,
                Landmark::RightShoulder,
            ],
        }
    }

    /// Get the same landmark on the other side of the body. The trunk
    /// landmarks are on the mid-sagittal plane and map to themselves.
    ///
    /// # Returns
    /// The contralateral landmark.
    pub fn contralateral(&self) -> Self {
        let value = *self as u8;
        match self {
            Landmark::C7T1 | Landmark::L5S1 => *self,
            _ => Landmark::from_repr((value + 4) % 8).unwrap_or(*self),
        }
    }
}

/// Segment of the arm.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Segment {
    UpperArm = 0,
    Forearm = 1,
    Hand = 2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lateral_sign() {
        assert_eq!(Side::Left.lateral_sign(), -1.0);
        assert_eq!(Side::Right.lateral_sign(), 1.0);
    }

    #[test]
    fn test_side_name() {
        assert_eq!(Side::Left.as_ref(), "left");
        assert_eq!(Side::Right.to_string(), "right");
    }

    #[test]
    fn test_landmark_name() {
        assert_eq!(Landmark::LeftHand.as_ref(), "left_hand");
        assert_eq!(Landmark::RightShoulder.as_ref(), "right_shoulder");
        assert_eq!(Landmark::C7T1.as_ref(), "c7t1");
        assert_eq!(Landmark::L5S1.as_ref(), "l5s1");
    }

    #[test]
    fn test_arm() {
        assert_eq!(Landmark::arm(Side::Left)[0], Landmark::LeftHand);
        assert_eq!(Landmark::arm(Side::Right)[3], Landmark::RightShoulder);
    }

    #[test]
    fn test_contralateral() {
        assert_eq!(Landmark::LeftHand.contralateral(), Landmark::RightHand);
        assert_eq!(Landmark::RightShoulder.contralateral(), Landmark::LeftShoulder);
        assert_eq!(Landmark::C7T1.contralateral(), Landmark::C7T1);
        assert_eq!(Landmark::L5S1.contralateral(), Landmark::L5S1);

        // Applying twice gives the same landmark
        Landmark::iter().for_each(|landmark| {
            assert_eq!(landmark.contralateral().contralateral(), landmark);
        });
    }
}
