fn main() {
    let numbers = [1, 2, 3, 4, 5];
    let sum: i32 = numbers.iter().sum();
    println!("Hello, World!");
    println!("Sum: {}", sum);
}
