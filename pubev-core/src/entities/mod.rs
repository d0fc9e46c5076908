pub mod public_event;
