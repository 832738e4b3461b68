// Number of inputs to the strength network
pub const NUM_INPUT: usize = 18;

// Number of tanh nodes in the hidden layer of the strength network
pub const NUM_HIDDEN_NODE: usize = 13;

// Each arm has the upper arm, forearm, and hand.
pub const NUM_SEGMENT: usize = 3;

pub const NUM_LANDMARK: usize = 10;

// Each axis of the bound code is in {-1, 0, 1}. Therefore, we have 3^4 = 81
// cells in the bound table.
pub const NUM_CODE_VALUE: usize = 3;
pub const NUM_CODE_AXIS: usize = 4;
pub const NUM_BOUND_CELL: usize = 81;

// Order of the components in the shoulder axis system (SAS)
pub const INDEX_ANTERIOR: usize = 0;
pub const INDEX_SUPERIOR: usize = 1;
pub const INDEX_LATERAL: usize = 2;

// Gravitational acceleration in m/s^2
pub const GRAVITY_ACCELERATION: f64 = 9.81;

// Band of the hand height around the shoulder in m to decide the height code
pub const HEIGHT_BAND: f64 = 0.01;

// Vectors with the norm below this value can not be normalized.
pub const MIN_NORM: f64 = 1e-12;
