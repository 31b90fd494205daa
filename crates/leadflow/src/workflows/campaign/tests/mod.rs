mod allocator;
mod common;
mod dispatch;
