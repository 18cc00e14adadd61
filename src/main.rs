#[tokio::main]
async fn main() {
    room_timeline::run().await;
}
