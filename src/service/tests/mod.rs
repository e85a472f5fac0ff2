use backoffice_test_utils::prelude::*;

use crate::util::test::app_state;

mod settings;
mod transaction;
mod user;
