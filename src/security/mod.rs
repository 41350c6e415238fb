pub mod jwt_inspector;
