pub mod struct_helper;
