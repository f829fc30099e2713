fn main() {
    places_frontend::start();
}
