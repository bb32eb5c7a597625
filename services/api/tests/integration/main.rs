mod helpers;
mod router_test;
