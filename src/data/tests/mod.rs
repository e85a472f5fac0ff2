use backoffice_test_utils::prelude::*;

use crate::model::PageRequest;

mod settings;
